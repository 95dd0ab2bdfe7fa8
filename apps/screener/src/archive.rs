//! Resume archive — keeps the uploaded original next to the extracted text.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;

#[async_trait]
pub trait ResumeArchive: Send + Sync {
    /// Stores the file and returns its object key.
    async fn store(&self, filename: &str, content: Bytes) -> Result<String, AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// `resumes/<uuid>.<ext>`; the client-supplied name never reaches the key.
pub fn object_key(id: Uuid, extension: &str) -> String {
    format!("resumes/{id}.{extension}")
}

pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        _ => "application/octet-stream",
    }
}

fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

#[derive(Clone)]
pub struct S3ResumeArchive {
    client: S3Client,
    bucket: String,
}

impl S3ResumeArchive {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Client configured for MinIO (local) or AWS (production).
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "screener-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(&config.s3_endpoint)
            .load()
            .await;

        Self::new(S3Client::new(&s3_config), config.s3_bucket.clone())
    }
}

#[async_trait]
impl ResumeArchive for S3ResumeArchive {
    async fn store(&self, filename: &str, content: Bytes) -> Result<String, AppError> {
        let extension = extension_of(filename);
        let key = object_key(Uuid::new_v4(), &extension);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(content))
            .content_type(content_type_for(&extension))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Archived resume to s3://{}/{}", self.bucket, key);
        Ok(key)
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 delete failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::InMemoryArchive;

#[cfg(test)]
mod memory {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryArchive {
        pub objects: Mutex<HashMap<String, Bytes>>,
    }

    #[async_trait]
    impl ResumeArchive for InMemoryArchive {
        async fn store(&self, filename: &str, content: Bytes) -> Result<String, AppError> {
            let key = object_key(Uuid::new_v4(), &extension_of(filename));
            self.objects.lock().await.insert(key.clone(), content);
            Ok(key)
        }

        async fn remove(&self, key: &str) -> Result<(), AppError> {
            self.objects.lock().await.remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_ignores_client_filename() {
        let id = Uuid::nil();
        assert_eq!(
            object_key(id, "pdf"),
            "resumes/00000000-0000-0000-0000-000000000000.pdf"
        );
    }

    #[test]
    fn test_extension_and_content_type() {
        assert_eq!(extension_of("../../etc/Resume.DOCX"), "docx");
        assert_eq!(extension_of("noext"), "bin");
        assert_eq!(content_type_for("pdf"), "application/pdf");
        assert_eq!(content_type_for("exe"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_memory_archive_roundtrip() {
        let archive = InMemoryArchive::default();
        let key = archive
            .store("cv.pdf", Bytes::from_static(b"%PDF"))
            .await
            .unwrap();
        assert!(key.starts_with("resumes/") && key.ends_with(".pdf"));
        archive.remove(&key).await.unwrap();
        assert!(archive.objects.lock().await.is_empty());
    }
}
