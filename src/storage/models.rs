use std::path::PathBuf;

/// Canned ACLs this crate applies to objects it writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAcl {
    PublicRead,
}

impl ObjectAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectAcl::PublicRead => "public-read",
        }
    }
}

/// Payload of a put request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutBody {
    /// Streamed from a local file by the backend
    SourceFile(PathBuf),
    Bytes(Vec<u8>),
}

impl PutBody {
    pub fn describe(&self) -> String {
        match self {
            PutBody::SourceFile(path) => format!("file {}", path.display()),
            PutBody::Bytes(data) => format!("{} bytes", data.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    pub acl: ObjectAcl,
    pub bucket: String,
    pub key: String,
    pub body: PutBody,
    pub content_type: String,
}

/// What the backend reports after a successful put
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectOutput {
    /// Publicly reachable URL of the stored object
    pub object_url: String,
    pub e_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteObjectRequest {
    pub bucket: String,
    pub key: String,
}

/// What the backend reports after a successful delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteObjectOutput {
    pub key: String,
    pub delete_marker: bool,
    pub version_id: Option<String>,
}
