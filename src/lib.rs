//! Blocking S3 storage component: upload a file, upload raw data, delete an object.
//!
//! ```no_run
//! use s3_storage::{ObjectStorageClient, StorageConfig};
//!
//! # fn main() -> s3_storage::Result<()> {
//! let config = StorageConfig::new("AKIA...", "secret", "us-east-1", "my-bucket");
//! let storage = ObjectStorageClient::connect(&config, 0)?;
//! match storage.upload_file("/path/to/file.png", "images/file.png") {
//!     Some(url) => println!("{url}"),
//!     None => eprintln!("upload failed"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod storage;
pub mod utils {
    pub mod file_utils;
    pub mod log_utils;
}

pub use args::{Args, Command};
pub use config::StorageConfig;
pub use errors::{Result, StorageError};
pub use interfaces::{MimeDetector, StorageBackend};
pub use storage::{ExtensionMimeDetector, ObjectStorageClient, S3Backend};

/// Run one CLI command. `Ok(None)` is the failure sentinel of the storage operation;
/// `Err` means the command could not be set up (bad config, unreadable payload).
pub fn run_app(args: &Args) -> Result<Option<String>> {
    let config = args.storage_config()?;
    utils::log_utils::debug(&format!("Resolved config: {:?}", config), args.verbose);

    let storage = ObjectStorageClient::connect(&config, args.verbose)?;
    run_command(&storage, args)
}

/// Dispatch a parsed command against any client
pub fn run_command<B, M>(storage: &ObjectStorageClient<B, M>, args: &Args) -> Result<Option<String>>
where
    B: StorageBackend,
    M: MimeDetector,
{
    let outcome = match &args.command {
        Command::UploadFile { path, name } => storage.upload_file(path, name),
        Command::UploadData {
            name,
            content_type,
            ..
        } => {
            let payload = args.data_payload()?;
            storage.upload_data(name, content_type, payload)
        }
        Command::Delete { name } => storage.delete_object(name),
    };
    Ok(outcome)
}
