use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5001;

/// Names printed in the certificate header.
#[derive(Clone, Debug)]
pub struct Branding {
    pub organization: String,
    pub office: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            organization: "UNIVERSITY OF DEMO".to_string(),
            office: "Office of Student Affairs".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub artifact_dir: PathBuf,
    pub branding: Branding,
    /// Base URL the browser form posts to. Empty means same origin.
    pub form_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let base_dir = std::env::current_dir()?;
        let artifact_dir = base_dir.join(
            std::env::var("ARTIFACT_DIR").unwrap_or_else(|_| "uploads".to_string()),
        );

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = port_from_env();

        let defaults = Branding::default();
        let branding = Branding {
            organization: std::env::var("CERTIFICATE_ORGANIZATION")
                .unwrap_or(defaults.organization),
            office: std::env::var("CERTIFICATE_OFFICE").unwrap_or(defaults.office),
        };

        let form_api_url = std::env::var("FORM_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            artifact_dir,
            branding,
            form_api_url,
        })
    }
}

/// Settings for the terminal form client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub download_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("CERTIFICATE_API_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port_from_env()));
        let download_dir = std::env::var("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            api_url,
            download_dir,
        }
    }
}

fn port_from_env() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
