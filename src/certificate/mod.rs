// Enrollment certificate generation.
// Layout is computed as plain marks, then encoded with lopdf using the
// standard-14 Helvetica faces so no font files are needed at runtime.
mod layout;
mod metrics;
mod render;
mod request;

pub use layout::{certificate_number, layout, FontFace, Mark, Page, Rgb};
pub use render::{render, RenderError};
pub use request::{long_date, Certificate, CertificateRequest, ValidationError, REQUIRED_FIELDS};

use chrono::{DateTime, Utc};

use crate::config::Branding;

pub const DOCUMENT_TITLE: &str = "Enrollment Certificate";

/// Lays out and renders one certificate to PDF bytes.
pub fn generate(
    certificate: &Certificate,
    branding: &Branding,
    issued_at: DateTime<Utc>,
) -> Result<Vec<u8>, RenderError> {
    let page = layout(certificate, branding, issued_at);
    render(&page, DOCUMENT_TITLE)
}
