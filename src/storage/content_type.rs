use crate::interfaces::MimeDetector;
use std::path::Path;

/// Guesses a content type from the file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionMimeDetector;

impl MimeDetector for ExtensionMimeDetector {
    fn detect(&self, path: &Path) -> String {
        mime_guess::from_path(path)
            .first()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM)
            .essence_str()
            .to_string()
    }
}
