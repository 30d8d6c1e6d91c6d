//! Render pipeline: sanitize → layout → encode.
//!
//! `render_pdf` is synchronous and CPU-bound; async callers go through
//! `render_pdf_blocking`, which moves it onto tokio's blocking pool.

pub mod logo;
pub mod pdf;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;
use crate::layout::{layout, sanitize, TemplateConfig};
use crate::render::logo::LogoImage;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Content cannot be empty")]
    EmptyInput,

    #[error("Generated PDF is empty")]
    EmptyOutput,

    #[error("PDF encoding failed: {0}")]
    Encode(String),
}

/// A finished PDF. `bytes` is immutable and cheap to clone.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Bytes,
    pub page_count: usize,
}

impl RenderedPdf {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Renders `content` into a PDF.
///
/// Blank content is rejected before any page is created. The logo at
/// `logo_path` is optional; when it is missing or unreadable every page gets
/// the placeholder rectangle instead.
pub fn render_pdf(
    content: &str,
    template: &TemplateConfig,
    logo_path: Option<&Path>,
) -> Result<RenderedPdf, RenderError> {
    if content.trim().is_empty() {
        return Err(RenderError::EmptyInput);
    }

    let text = sanitize(content);
    let logo = logo_path.and_then(LogoImage::load);
    let document = layout(&text, template, logo.is_some());
    let bytes = pdf::encode(&document, template, logo.as_ref())?;

    if bytes.is_empty() {
        return Err(RenderError::EmptyOutput);
    }

    debug!(
        pages = document.page_count(),
        bytes = bytes.len(),
        logo = logo.is_some(),
        "Rendered PDF"
    );

    Ok(RenderedPdf {
        bytes: Bytes::from(bytes),
        page_count: document.page_count(),
    })
}

/// Runs [`render_pdf`] on the blocking pool so the async executor stays free.
pub async fn render_pdf_blocking(
    content: String,
    template: Arc<TemplateConfig>,
    logo_path: Option<PathBuf>,
) -> Result<RenderedPdf, AppError> {
    let rendered = tokio::task::spawn_blocking(move || {
        render_pdf(&content, &template, logo_path.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;
    Ok(rendered)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
