pub mod client;
pub mod content_type;
pub mod models;
pub mod object_url;
pub mod s3_backend;

// Re-export types for convenient access from other modules
pub use client::{ObjectStorageClient, validate_object_name};
pub use content_type::ExtensionMimeDetector;
pub use models::{
    DeleteObjectOutput, DeleteObjectRequest, ObjectAcl, PutBody, PutObjectOutput,
    PutObjectRequest,
};
pub use object_url::ObjectUrlBuilder;
pub use s3_backend::S3Backend;
