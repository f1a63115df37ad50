use std::fmt;

#[derive(Debug)]
pub(crate) enum FileSystemError {
    NotFile,
    ReadFile,
    BadGlob,
    LargeFile,
}

impl std::error::Error for FileSystemError {}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::NotFile => write!(f, "Not a file"),
            FileSystemError::ReadFile => write!(f, "Could not read file"),
            FileSystemError::BadGlob => write!(f, "Could not glob"),
            FileSystemError::LargeFile => write!(f, "File larger than 2GB"),
        }
    }
}
