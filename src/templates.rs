use tera::Tera;

const INDEX: &str = include_str!("../templates/index.html");

/// Builds the template set. Templates are compiled into the binary so the
/// server does not depend on its working directory.
pub fn load() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", INDEX)?;
    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    #[test]
    fn index_renders_every_form_field() {
        let tera = load().unwrap();
        let mut ctx = Context::new();
        ctx.insert("api_url", "http://api.test");
        ctx.insert("organization", "Test College");
        let html = tera.render("index.html", &ctx).unwrap();

        for name in [
            "studentName",
            "dateOfBirth",
            "programName",
            "enrollmentDate",
            "expectedGraduationDate",
        ] {
            assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
        }
        assert!(html.contains("http://api.test"));
        assert_eq!(html.matches(" required>").count(), 5);
    }
}
