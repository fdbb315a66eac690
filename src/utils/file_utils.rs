use crate::errors::{Result, StorageError};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read a value from a file, trimming surrounding whitespace and newlines
pub fn read_value_from_file(file_path: &Path) -> Result<String> {
    let mut value = String::new();
    File::open(file_path)
        .and_then(|mut file| file.read_to_string(&mut value))
        .map_err(|e| {
            StorageError::Config(format!(
                "Failed to read '{}': {}",
                file_path.display(),
                e
            ))
        })?;

    Ok(value.trim().to_string())
}

/// Pick a credential from either a direct value or a file holding it.
/// The file wins when both are supplied. Only file contents are trimmed.
pub fn value_or_file(value: Option<&str>, file: Option<&Path>) -> Result<Option<String>> {
    if let Some(path) = file {
        return read_value_from_file(path).map(Some);
    }
    Ok(value.map(str::to_string))
}

/// Open the file for reading and confirm it is a regular file
pub fn ensure_readable_file(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| StorageError::source_file(path, e))?;
    let metadata = file
        .metadata()
        .map_err(|e| StorageError::source_file(path, e))?;
    if !metadata.is_file() {
        return Err(StorageError::source_file(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    Ok(())
}

/// clap value parser: the argument must name a readable file
pub fn check_readable_file(file: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if path.is_file() && fs::metadata(&path).is_ok() {
        Ok(path)
    } else {
        Err(format!("The file '{}' is not readable.", file))
    }
}
