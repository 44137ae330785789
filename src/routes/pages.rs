use axum::{extract::State, response::Html};
use std::sync::Arc;
use tera::Context;

use crate::error::ApiError;
use crate::state::AppState;

/// The certificate request form.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let mut ctx = Context::new();
    ctx.insert("api_url", &state.config.form_api_url);
    ctx.insert("organization", &state.config.branding.organization);

    let rendered = state
        .templates
        .render("index.html", &ctx)
        .map_err(|e| ApiError::internal("Failed to render form", e))?;
    Ok(Html(rendered))
}
