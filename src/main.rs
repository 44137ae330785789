use enrollment_certificates::{config, routes, state, storage, templates};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "enrollment_certificates=info,tower_http=info".into()),
        )
        .init();

    let config = Arc::new(config::Config::from_env()?);

    storage::ensure_dir(&config.artifact_dir)?;
    tracing::info!("Staging certificates in {}", config.artifact_dir.display());

    let state = Arc::new(state::AppState {
        config: config.clone(),
        templates: Arc::new(templates::load()?),
    });

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Enrollment certificate API listening on http://{}", addr);
    tracing::info!("Certificate generation endpoint: http://{}/generate-pdf", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
