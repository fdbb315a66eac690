use crate::errors::Result;
use crate::storage::models::{
    DeleteObjectOutput, DeleteObjectRequest, PutObjectOutput, PutObjectRequest,
};
use mockall::automock;
use std::path::Path;

/// Interface for the object-storage SDK client to facilitate testing
#[automock]
pub trait StorageBackend: Send + Sync {
    fn put_object(&self, request: &PutObjectRequest) -> Result<PutObjectOutput>;
    fn delete_object(&self, request: &DeleteObjectRequest) -> Result<DeleteObjectOutput>;
}

/// Interface for content-type detection of local files
#[automock]
pub trait MimeDetector: Send + Sync {
    fn detect(&self, path: &Path) -> String;
}
