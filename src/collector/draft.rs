use serde::Serialize;

/// One input of the certificate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StudentName,
    DateOfBirth,
    ProgramName,
    EnrollmentDate,
    ExpectedGraduationDate,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::StudentName,
        Field::DateOfBirth,
        Field::ProgramName,
        Field::EnrollmentDate,
        Field::ExpectedGraduationDate,
    ];

    /// JSON key sent to the API.
    pub fn key(self) -> &'static str {
        match self {
            Field::StudentName => "studentName",
            Field::DateOfBirth => "dateOfBirth",
            Field::ProgramName => "programName",
            Field::EnrollmentDate => "enrollmentDate",
            Field::ExpectedGraduationDate => "expectedGraduationDate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::StudentName => "Student Full Name",
            Field::DateOfBirth => "Date of Birth",
            Field::ProgramName => "Program Name",
            Field::EnrollmentDate => "Enrollment Date",
            Field::ExpectedGraduationDate => "Expected Graduation Date",
        }
    }

    pub fn is_date(self) -> bool {
        !matches!(self, Field::StudentName | Field::ProgramName)
    }
}

/// Snapshot of the form. Updates return a new snapshot; the old one is left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    student_name: String,
    date_of_birth: String,
    program_name: String,
    enrollment_date: String,
    expected_graduation_date: String,
}

impl FormDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StudentName => &self.student_name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::ProgramName => &self.program_name,
            Field::EnrollmentDate => &self.enrollment_date,
            Field::ExpectedGraduationDate => &self.expected_graduation_date,
        }
    }

    #[must_use]
    pub fn with(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            Field::StudentName => &mut next.student_name,
            Field::DateOfBirth => &mut next.date_of_birth,
            Field::ProgramName => &mut next.program_name,
            Field::EnrollmentDate => &mut next.enrollment_date,
            Field::ExpectedGraduationDate => &mut next.expected_graduation_date,
        };
        *slot = value.into();
        next
    }

    /// Fields that would fail the form's required constraint.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_replaces_only_one_field() {
        let empty = FormDraft::default();
        let named = empty.with(Field::StudentName, "Jane Doe");
        let dated = named.with(Field::DateOfBirth, "2000-01-15");

        assert_eq!(empty.get(Field::StudentName), "");
        assert_eq!(named.get(Field::StudentName), "Jane Doe");
        assert_eq!(named.get(Field::DateOfBirth), "");
        assert_eq!(dated.get(Field::StudentName), "Jane Doe");
        assert_eq!(dated.get(Field::DateOfBirth), "2000-01-15");
    }

    #[test]
    fn missing_fields_in_form_order() {
        let draft = FormDraft::default()
            .with(Field::ProgramName, "Computer Science")
            .with(Field::StudentName, "  ");
        assert_eq!(
            draft.missing(),
            vec![
                Field::StudentName,
                Field::DateOfBirth,
                Field::EnrollmentDate,
                Field::ExpectedGraduationDate
            ]
        );
        assert!(!draft.is_complete());
    }

    #[test]
    fn serializes_with_api_keys() {
        let draft = Field::ALL
            .into_iter()
            .fold(FormDraft::default(), |d, f| d.with(f, f.key()));
        let value = serde_json::to_value(&draft).unwrap();
        for field in Field::ALL {
            assert_eq!(value[field.key()], field.key());
        }
        assert!(draft.is_complete());
    }

    #[test]
    fn date_fields() {
        let dates: Vec<_> = Field::ALL.into_iter().filter(|f| f.is_date()).collect();
        assert_eq!(
            dates,
            vec![
                Field::DateOfBirth,
                Field::EnrollmentDate,
                Field::ExpectedGraduationDate
            ]
        );
    }
}
