//! Object storage for generated documents.
//!
//! Carried in `AppState` as `Arc<dyn ObjectStore>`; `S3Store` is the production
//! backend (AWS S3 or any S3-compatible endpoint such as MinIO).

pub mod s3;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use s3::S3Store;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Key prefix every generated document is stored under.
const KEY_PREFIX: &str = "pdfs";

/// Longest validity a SigV4 presigned URL may have.
pub const MAX_SIGNED_URL_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Could not sign download URL: {0}")]
    Presign(String),
}

/// How the uploaded object is exposed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Long-lived, world-readable URL.
    Public,
    /// Time-limited presigned GET URL.
    Signed { ttl: Duration },
}

/// A stored object and the link handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads `body` under `key` and returns a link according to `mode`.
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        mode: LinkMode,
    ) -> Result<StoredObject, StorageError>;
}

/// File name for a document generated at `at`: `resource_YYYYMMDD_HHMMSS.pdf`.
pub fn resource_filename(at: DateTime<Utc>) -> String {
    at.format("resource_%Y%m%d_%H%M%S.pdf").to_string()
}

/// Storage key for a generated file name.
pub fn object_key(filename: &str) -> String {
    format!("{KEY_PREFIX}/{filename}")
}


// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resource_filename_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(resource_filename(at), "resource_20240307_090502.pdf");
    }

    #[test]
    fn test_object_key_prefix() {
        assert_eq!(
            object_key("resource_20240307_090502.pdf"),
            "pdfs/resource_20240307_090502.pdf"
        );
    }

    #[test]
    fn test_max_ttl_is_seven_days() {
        assert_eq!(MAX_SIGNED_URL_TTL.as_secs(), 604_800);
    }
}
