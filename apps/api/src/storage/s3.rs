use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;

use crate::storage::{LinkMode, ObjectStore, StorageError, StoredObject, MAX_SIGNED_URL_TTL};

/// S3-backed document store.
#[derive(Clone)]
pub struct S3Store {
    client: S3Client,
    bucket: String,
    region: String,
    /// Custom endpoint (MinIO/local). Public URLs use path-style addressing against it.
    endpoint: Option<String>,
    /// CDN or website origin that fronts the bucket; wins over the endpoint when set.
    public_base_url: Option<String>,
}

impl S3Store {
    pub fn new(
        client: S3Client,
        bucket: String,
        region: String,
        endpoint: Option<String>,
        public_base_url: Option<String>,
    ) -> Self {
        S3Store {
            client,
            bucket,
            region,
            endpoint,
            public_base_url,
        }
    }

    /// Unsigned URL of a publicly readable object.
    pub fn public_url(&self, key: &str) -> String {
        if let Some(base) = &self.public_base_url {
            format!("{}/{key}", base.trim_end_matches('/'))
        } else if let Some(endpoint) = &self.endpoint {
            format!("{}/{}/{key}", endpoint.trim_end_matches('/'), self.bucket)
        } else {
            format!("https://{}.s3.{}.amazonaws.com/{key}", self.bucket, self.region)
        }
    }

    async fn presigned_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let config = PresigningConfig::expires_in(ttl.min(MAX_SIGNED_URL_TTL))
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        Ok(request.uri().to_string())
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        mode: LinkMode,
    ) -> Result<StoredObject, StorageError> {
        let size = body.len();
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type);
        if mode == LinkMode::Public {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }
        request
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        info!("Uploaded {size} bytes to s3://{}/{}", self.bucket, key);

        let url = match mode {
            LinkMode::Public => self.public_url(key),
            LinkMode::Signed { ttl } => self.presigned_url(key, ttl).await?,
        };

        Ok(StoredObject {
            key: key.to_string(),
            url,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
