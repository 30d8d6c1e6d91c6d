//! Axum route handlers for PDF generation.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::{render_pdf_blocking, RenderedPdf};
use crate::state::AppState;
use crate::storage::{object_key, resource_filename, LinkMode, PDF_CONTENT_TYPE};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GeneratePdfRequest {
    pub content: Option<String>,
    /// `true` → time-limited signed link, `false`/absent → public link.
    #[serde(default)]
    pub secure: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePdfResponse {
    pub success: bool,
    pub download_url: String,
    pub filename: String,
    pub content_type: &'static str,
    pub size: usize,
    pub secure_url: bool,
}

#[derive(Debug, Serialize)]
pub struct GeneratePdfWithDataResponse {
    #[serde(flatten)]
    pub upload: GeneratePdfResponse,
    /// Base64 of the PDF bytes.
    pub pdf_data: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-pdf
///
/// Renders the content, uploads it and returns the download link.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<GeneratePdfRequest>,
) -> Result<Json<GeneratePdfResponse>, AppError> {
    let (upload, _) = generate_and_upload(&state, request).await?;
    Ok(Json(upload))
}

/// POST /generate-pdf-with-data
///
/// Same as `/generate-pdf`, and also returns the document inline as base64.
pub async fn handle_generate_pdf_with_data(
    State(state): State<AppState>,
    Json(request): Json<GeneratePdfRequest>,
) -> Result<Json<GeneratePdfWithDataResponse>, AppError> {
    let (upload, pdf) = generate_and_upload(&state, request).await?;
    Ok(Json(GeneratePdfWithDataResponse {
        upload,
        pdf_data: STANDARD.encode(&pdf.bytes),
    }))
}

/// Shared pipeline: validate → render (blocking pool) → upload.
async fn generate_and_upload(
    state: &AppState,
    request: GeneratePdfRequest,
) -> Result<(GeneratePdfResponse, RenderedPdf), AppError> {
    let content = request
        .content
        .ok_or_else(|| AppError::Validation("Missing 'content' in request".to_string()))?;
    if content.trim().is_empty() {
        return Err(AppError::Validation("Content cannot be empty".to_string()));
    }
    let secure = request.secure.unwrap_or(false);
    let request_id = Uuid::new_v4();

    let pdf = render_pdf_blocking(
        content,
        state.template.clone(),
        Some(state.config.logo_path.clone()),
    )
    .await?;

    let filename = resource_filename(Utc::now());
    let mode = if secure {
        LinkMode::Signed {
            ttl: state.config.signed_url_ttl,
        }
    } else {
        LinkMode::Public
    };

    let stored = state
        .store
        .put(&object_key(&filename), pdf.bytes.clone(), PDF_CONTENT_TYPE, mode)
        .await?;

    info!(
        %request_id,
        key = %stored.key,
        pages = pdf.page_count,
        size = pdf.size(),
        secure,
        "PDF generated and uploaded"
    );

    let response = GeneratePdfResponse {
        success: true,
        download_url: stored.url,
        filename,
        content_type: PDF_CONTENT_TYPE,
        size: pdf.size(),
        secure_url: secure,
    };
    Ok((response, pdf))
}
