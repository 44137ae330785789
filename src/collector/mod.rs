//! Client side of the certificate form: draft state, submission to the API
//! and saving the returned PDF.

mod client;
mod draft;
mod session;

pub use client::{CertificateClient, DownloadedCertificate, SubmitError};
pub use draft::{Field, FormDraft};
pub use session::FormSession;
