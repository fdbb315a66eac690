use crate::config::StorageConfig;
use crate::errors::{Result, StorageError};
use crate::interfaces::{MimeDetector, StorageBackend};
use crate::storage::content_type::ExtensionMimeDetector;
use crate::storage::models::{
    DeleteObjectRequest, ObjectAcl, PutBody, PutObjectOutput, PutObjectRequest,
};
use crate::storage::s3_backend::S3Backend;
use crate::utils::file_utils::ensure_readable_file;
use crate::utils::log_utils::Logger;
use std::path::Path;

/// S3 rejects keys longer than this many bytes
pub const MAX_KEY_BYTES: usize = 1024;

/// Uploads and deletes objects in a single bucket.
///
/// The plain operations (`upload_file`, `upload_data`, `delete_object`) collapse
/// every failure into `None`. The `try_` variants return the underlying
/// [`StorageError`] for callers that need to tell failures apart.
pub struct ObjectStorageClient<B, M = ExtensionMimeDetector> {
    backend: B,
    mime: M,
    bucket: String,
    logger: Logger,
}

impl ObjectStorageClient<S3Backend> {
    /// Build an S3-backed client from validated settings
    pub fn connect(config: &StorageConfig, verbose: u8) -> Result<Self> {
        let backend = S3Backend::new(config, verbose)?;
        Ok(Self::new(backend, config.bucket.trim()).with_verbosity(verbose))
    }
}

impl<B: StorageBackend> ObjectStorageClient<B> {
    pub fn new(backend: B, bucket: impl Into<String>) -> Self {
        Self {
            backend,
            mime: ExtensionMimeDetector,
            bucket: bucket.into(),
            logger: Logger::default(),
        }
    }
}

impl<B: StorageBackend, M: MimeDetector> ObjectStorageClient<B, M> {
    pub fn with_mime_detector<N: MimeDetector>(self, mime: N) -> ObjectStorageClient<B, N> {
        ObjectStorageClient {
            backend: self.backend,
            mime,
            bucket: self.bucket,
            logger: self.logger,
        }
    }

    /// Failures are reported on stderr at verbosity >= 1
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        self.logger = Logger::new(verbose);
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Upload a local file with public-read visibility.
    /// Returns the object's public URL, or `None` on any failure.
    pub fn upload_file(&self, path: impl AsRef<Path>, name: &str) -> Option<String> {
        self.settle("upload_file", name, self.try_upload_file(path, name))
    }

    /// Upload an in-memory payload with public-read visibility.
    /// Returns the object's public URL, or `None` on any failure.
    pub fn upload_data(
        &self,
        name: &str,
        content_type: &str,
        data: impl AsRef<[u8]>,
    ) -> Option<String> {
        self.settle(
            "upload_data",
            name,
            self.try_upload_data(name, content_type, data),
        )
    }

    /// Delete an object. Returns the deleted key, or `None` on any failure.
    pub fn delete_object(&self, name: &str) -> Option<String> {
        self.settle("delete_object", name, self.try_delete_object(name))
    }

    pub fn try_upload_file(&self, path: impl AsRef<Path>, name: &str) -> Result<String> {
        let path = path.as_ref();
        validate_object_name(name)?;
        ensure_readable_file(path)?;

        let content_type = self.mime.detect(path);
        self.logger.debug(&format!(
            "Uploading {} to {}/{} as {}",
            path.display(),
            self.bucket,
            name,
            content_type
        ));

        let output = self.backend.put_object(&PutObjectRequest {
            acl: ObjectAcl::PublicRead,
            bucket: self.bucket.clone(),
            key: name.to_string(),
            body: PutBody::SourceFile(path.to_path_buf()),
            content_type,
        })?;
        Ok(self.stored(name, output))
    }

    pub fn try_upload_data(
        &self,
        name: &str,
        content_type: &str,
        data: impl AsRef<[u8]>,
    ) -> Result<String> {
        validate_object_name(name)?;

        let data = data.as_ref();
        self.logger.debug(&format!(
            "Uploading {} bytes to {}/{} as {}",
            data.len(),
            self.bucket,
            name,
            content_type
        ));

        let output = self.backend.put_object(&PutObjectRequest {
            acl: ObjectAcl::PublicRead,
            bucket: self.bucket.clone(),
            key: name.to_string(),
            body: PutBody::Bytes(data.to_vec()),
            content_type: content_type.to_string(),
        })?;
        Ok(self.stored(name, output))
    }

    pub fn try_delete_object(&self, name: &str) -> Result<String> {
        validate_object_name(name)?;
        self.logger.debug(&format!("Deleting {}/{}", self.bucket, name));

        let output = self.backend.delete_object(&DeleteObjectRequest {
            bucket: self.bucket.clone(),
            key: name.to_string(),
        })?;
        self.logger.debug(&format!(
            "Deleted {} (delete marker: {}, version: {})",
            output.key,
            output.delete_marker,
            output.version_id.as_deref().unwrap_or("none")
        ));
        Ok(output.key)
    }

    fn stored(&self, name: &str, output: PutObjectOutput) -> String {
        self.logger.debug(&format!(
            "Stored {} (etag: {})",
            name,
            output.e_tag.as_deref().unwrap_or("none")
        ));
        output.object_url
    }

    fn settle(&self, operation: &str, name: &str, result: Result<String>) -> Option<String> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.logger.info(&format!("{} '{}' failed: {}", operation, name, e));
                None
            }
        }
    }
}

/// Object keys must be non-empty and at most [`MAX_KEY_BYTES`] long
pub fn validate_object_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidKey("object name is empty".to_string()));
    }
    if name.len() > MAX_KEY_BYTES {
        return Err(StorageError::InvalidKey(format!(
            "object name is {} bytes, limit is {}",
            name.len(),
            MAX_KEY_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names() {
        assert!(validate_object_name("images/a.png").is_ok());
        assert!(validate_object_name("a").is_ok());
        assert!(matches!(
            validate_object_name(""),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(validate_object_name(&"k".repeat(MAX_KEY_BYTES)).is_ok());
        assert!(validate_object_name(&"k".repeat(MAX_KEY_BYTES + 1)).is_err());
    }
}
