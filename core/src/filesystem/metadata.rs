use crate::filesystem::error::FileSystemError;
use log::error;

pub(crate) struct GlobInfo {
    pub(crate) full_path: String,
    pub(crate) filename: String,
    pub(crate) is_file: bool,
}

/// Execute a provided Glob pattern (Ex: /files/*) and return results
pub(crate) fn glob_paths(glob_pattern: &str) -> Result<Vec<GlobInfo>, FileSystemError> {
    let mut info = Vec::new();
    let glob_results = glob::glob(glob_pattern);
    let paths = match glob_results {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not glob {glob_pattern}: {err:?}");
            return Err(FileSystemError::BadGlob);
        }
    };

    for entry in paths.flatten() {
        let glob_info = GlobInfo {
            full_path: entry.to_str().unwrap_or_default().to_string(),
            filename: entry
                .file_name()
                .unwrap_or_default()
                .to_str()
                .unwrap_or_default()
                .to_string(),
            is_file: entry.is_file(),
        };
        info.push(glob_info);
    }

    Ok(info)
}
