use crate::filesystem::error::FileSystemError;
use log::error;
use std::fs::read;
use std::path::Path;

/// Check if path is a file
pub(crate) fn is_file(path: &str) -> bool {
    let file = Path::new(path);
    if file.is_file() {
        return true;
    }
    false
}

/// Check if path is a directory
pub(crate) fn is_directory(path: &str) -> bool {
    let dir = Path::new(path);
    if dir.is_dir() {
        return true;
    }
    false
}

/// Get the extension of the provided file, lowercased
pub(crate) fn file_extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .unwrap_or_default()
        .to_str()
        .unwrap_or_default()
        .to_lowercase()
}

/// Read a file that is less than 2GB in size
pub(crate) fn read_file(path: &str) -> Result<Vec<u8>, FileSystemError> {
    if !is_file(path) {
        return Err(FileSystemError::NotFile);
    }
    if file_too_large(path) {
        return Err(FileSystemError::LargeFile);
    }

    let read_result = read(path);
    match read_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[taskscan] Failed to read file {path}: {err:?}");
            Err(FileSystemError::ReadFile)
        }
    }
}

/// Check if a file is larger than 2GB
fn file_too_large(path: &str) -> bool {
    let max_size = 2147483648;
    let meta = match Path::new(path).metadata() {
        Ok(result) => result,
        Err(_) => return false,
    };
    meta.len() > max_size
}
