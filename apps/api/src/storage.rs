//! Resume object storage behind a pluggable trait, so the submission
//! workflow can be exercised without network access.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ResumeRef;

/// A file attachment pulled out of the multipart form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// One-method upload capability injected into the application service.
/// Carried in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn upload(&self, file: &ResumeUpload) -> Result<ResumeRef, AppError>;
}

/// Production store: S3-compatible object storage (MinIO locally, AWS in
/// production). The returned `public_id` is the object key.
pub struct S3ResumeStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint: String,
}

impl S3ResumeStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, endpoint: String) -> Self {
        Self {
            client,
            bucket,
            endpoint,
        }
    }
}

#[async_trait]
impl ResumeStore for S3ResumeStore {
    async fn upload(&self, file: &ResumeUpload) -> Result<ResumeRef, AppError> {
        let key = format!("resumes/{}/{}", Uuid::new_v4(), sanitize(&file.filename));

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(file.bytes.clone()))
            .content_type(&file.content_type)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);

        let url = format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            key
        );
        Ok(ResumeRef {
            public_id: key,
            url,
        })
    }
}

/// Keeps object keys to a safe charset; everything else becomes '_'.
fn sanitize(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}
