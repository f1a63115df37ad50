use crate::structs::config::Output;
use crate::utils::error::UtilError;
use log::{error, LevelFilter};
use std::fs::{create_dir_all, File};

/// Create the log file for a scan and figure out the configured verbosity
pub(crate) fn create_log_file(output: &Output) -> Result<(File, LevelFilter), UtilError> {
    let path = format!("{}/{}", output.directory, output.name);
    let dir_result = create_dir_all(&path);
    if let Err(err) = dir_result {
        error!("[taskscan] Could not create output directory {path}: {err:?}");
        return Err(UtilError::CreateDirectory);
    }

    let log_result = File::create(format!("{path}/{}.log", output.name));
    let log_file = match log_result {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not create log file at {path}: {err:?}");
            return Err(UtilError::LogFile);
        }
    };

    let level = match output.logging.as_deref() {
        Some("debug") => LevelFilter::Debug,
        Some("error") => LevelFilter::Error,
        Some("off") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    };

    Ok((log_file, level))
}

#[cfg(test)]
mod tests {
    use super::create_log_file;
    use crate::structs::config::Output;
    use log::LevelFilter;

    #[test]
    fn test_create_log_file() {
        let output = Output {
            name: String::from("logging_test"),
            directory: std::env::temp_dir().display().to_string(),
            format: String::from("jsonl"),
            logging: Some(String::from("debug")),
        };

        let (_, level) = create_log_file(&output).unwrap();
        assert_eq!(level, LevelFilter::Debug);
    }

    #[test]
    fn test_create_log_file_default_level() {
        let output = Output {
            name: String::from("logging_test_default"),
            directory: std::env::temp_dir().display().to_string(),
            format: String::from("json"),
            logging: None,
        };

        let (_, level) = create_log_file(&output).unwrap();
        assert_eq!(level, LevelFilter::Warn);
    }
}
