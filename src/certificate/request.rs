use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const REQUIRED_FIELDS: [&str; 5] = [
    "studentName",
    "dateOfBirth",
    "programName",
    "enrollmentDate",
    "expectedGraduationDate",
];

/// Request body of `POST /generate-pdf`, as sent by the form.
///
/// Every field is optional on the wire so that a missing field is reported
/// by [`CertificateRequest::validate`] instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub student_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub program_name: Option<String>,
    pub enrollment_date: Option<String>,
    pub expected_graduation_date: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Missing required fields: {} (studentName, dateOfBirth, programName, enrollmentDate, and expectedGraduationDate are required)",
        .0.join(", ")
    )]
    Missing(Vec<&'static str>),

    #[error("Invalid date for {field}: expected YYYY-MM-DD, got {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// A validated certificate request, ready to lay out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub student_name: String,
    pub date_of_birth: NaiveDate,
    pub program_name: String,
    pub enrollment_date: NaiveDate,
    pub expected_graduation_date: NaiveDate,
}

impl CertificateRequest {
    pub fn validate(&self) -> Result<Certificate, ValidationError> {
        let values = [
            &self.student_name,
            &self.date_of_birth,
            &self.program_name,
            &self.enrollment_date,
            &self.expected_graduation_date,
        ];

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| present(value).is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::Missing(missing));
        }

        let text = |value: &Option<String>| present(value).unwrap_or_default().to_string();

        Ok(Certificate {
            student_name: text(&self.student_name),
            date_of_birth: parse_date("dateOfBirth", &text(&self.date_of_birth))?,
            program_name: text(&self.program_name),
            enrollment_date: parse_date("enrollmentDate", &text(&self.enrollment_date))?,
            expected_graduation_date: parse_date(
                "expectedGraduationDate",
                &text(&self.expected_graduation_date),
            )?,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, whose date part is kept.
fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Long-form date as printed on certificates, e.g. "January 5, 2024".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane_doe() -> CertificateRequest {
        CertificateRequest {
            student_name: Some("Jane Doe".into()),
            date_of_birth: Some("2000-01-15".into()),
            program_name: Some("Computer Science".into()),
            enrollment_date: Some("2023-09-01".into()),
            expected_graduation_date: Some("2027-06-15".into()),
        }
    }

    #[test]
    fn valid_request() {
        let cert = jane_doe().validate().unwrap();
        assert_eq!(cert.student_name, "Jane Doe");
        assert_eq!(cert.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 15).unwrap());
        assert_eq!(cert.expected_graduation_date, NaiveDate::from_ymd_opt(2027, 6, 15).unwrap());
    }

    #[test]
    fn each_missing_field_is_named() {
        for (i, field) in REQUIRED_FIELDS.iter().enumerate() {
            let mut req = jane_doe();
            match i {
                0 => req.student_name = None,
                1 => req.date_of_birth = None,
                2 => req.program_name = None,
                3 => req.enrollment_date = None,
                _ => req.expected_graduation_date = None,
            }
            let err = req.validate().unwrap_err();
            assert_eq!(err, ValidationError::Missing(vec![*field]));
            assert!(err.to_string().starts_with(&format!("Missing required fields: {field} (")));
        }
    }

    #[test]
    fn blank_counts_as_missing() {
        let mut req = jane_doe();
        req.student_name = Some("   ".into());
        req.program_name = Some(String::new());
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Missing(vec!["studentName", "programName"])
        );
    }

    #[test]
    fn empty_request_lists_everything() {
        let err = CertificateRequest::default().validate().unwrap_err();
        assert_eq!(err, ValidationError::Missing(REQUIRED_FIELDS.to_vec()));
    }

    #[test]
    fn values_are_trimmed() {
        let mut req = jane_doe();
        req.student_name = Some("  Jane Doe ".into());
        req.enrollment_date = Some(" 2023-09-01 ".into());
        let cert = req.validate().unwrap();
        assert_eq!(cert.student_name, "Jane Doe");
        assert_eq!(cert.enrollment_date, NaiveDate::from_ymd_opt(2023, 9, 1).unwrap());
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut req = jane_doe();
        req.date_of_birth = Some("15/01/2000".into());
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::InvalidDate {
                field: "dateOfBirth",
                value: "15/01/2000".into()
            }
        );

        req.date_of_birth = Some("2000-02-30".into());
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidDate { field: "dateOfBirth", .. })
        ));
    }

    #[test]
    fn rfc3339_timestamp_keeps_its_date() {
        let mut req = jane_doe();
        req.enrollment_date = Some("2023-09-01T08:30:00Z".into());
        let cert = req.validate().unwrap();
        assert_eq!(cert.enrollment_date, NaiveDate::from_ymd_opt(2023, 9, 1).unwrap());
    }

    #[test]
    fn camel_case_wire_format() {
        let req: CertificateRequest = serde_json::from_str(
            r#"{"studentName":"A","dateOfBirth":"2000-01-01","programName":"B",
                "enrollmentDate":"2020-01-01","expectedGraduationDate":"2024-01-01"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn long_dates() {
        let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(long_date(d(2024, 1, 5)), "January 5, 2024");
        assert_eq!(long_date(d(2000, 1, 15)), "January 15, 2000");
        assert_eq!(long_date(d(2023, 9, 1)), "September 1, 2023");
        assert_eq!(long_date(d(2027, 6, 15)), "June 15, 2027");
    }
}
