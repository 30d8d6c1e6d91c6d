use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub s3_bucket: String,
    /// Custom S3 endpoint (MinIO in local development). `None` means AWS.
    pub s3_endpoint: Option<String>,
    pub s3_region: String,
    /// Origin used to build public links, e.g. a CDN in front of the bucket.
    pub s3_public_base_url: Option<String>,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub signed_url_ttl: Duration,
    pub logo_path: PathBuf,
    pub brand_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ttl_days: u64 = optional_env("SIGNED_URL_TTL_DAYS")
            .unwrap_or_else(|| "7".to_string())
            .parse()
            .context("SIGNED_URL_TTL_DAYS must be a whole number of days")?;

        Ok(Config {
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: optional_env("S3_ENDPOINT"),
            s3_region: optional_env("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            s3_public_base_url: optional_env("S3_PUBLIC_BASE_URL"),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            signed_url_ttl: signed_url_ttl(ttl_days)?,
            logo_path: optional_env("LOGO_PATH")
                .unwrap_or_else(|| "static/logo.png".to_string())
                .into(),
            brand_name: optional_env("BRAND_NAME").unwrap_or_else(|| "NeuroLight".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Presigned URLs are valid for 1 to 7 days (SigV4 limit).
fn signed_url_ttl(days: u64) -> Result<Duration> {
    ensure!(
        (1..=7).contains(&days),
        "SIGNED_URL_TTL_DAYS must be between 1 and 7, got {days}"
    );
    Ok(Duration::from_secs(days * 24 * 60 * 60))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
