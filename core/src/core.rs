use crate::artifacts::tasks::parser::scan_tasks;
use crate::error::ConfigError;
use crate::output::output_results;
use crate::structs::config::{ScanConfig, TasksOptions};
use crate::utils::logging::create_log_file;
use log::{error, info};
use simplelog::{Config, WriteLogger};
use std::fs::read_to_string;

/// Run a scheduled task scan described by a TOML config file
pub fn parse_config_file(path: &str) -> Result<(), ConfigError> {
    let config_result = read_to_string(path);
    let config_data = match config_result {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not read config at {path}: {err:?}");
            return Err(ConfigError::ReadFile);
        }
    };

    let config: ScanConfig = match toml::from_str(&config_data) {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not parse config at {path}: {err:?}");
            return Err(ConfigError::BadToml);
        }
    };

    parse_config(&config)
}

/// Run a scheduled task scan from an already parsed config
pub fn parse_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.target.root.is_none() && config.target.alt_file.is_none() {
        return Err(ConfigError::NoTarget);
    }

    let log_result = create_log_file(&config.output);
    if let Ok((log_file, level)) = log_result {
        // Logger registration can only happen once per process
        let _ = WriteLogger::init(level, Config::default(), log_file);
    } else {
        return Err(ConfigError::Logging);
    }

    let options = TasksOptions {
        target_root: config.target.root.clone(),
        alt_file: config.target.alt_file.clone(),
        group: config.target.group.unwrap_or(true),
        tz_offset_seconds: config.target.tz_offset_seconds.unwrap_or(0),
    };

    info!("[taskscan] Starting scheduled task scan");
    let scan = match scan_tasks(&options) {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Scan failed: {err:?}");
            return Err(ConfigError::Scan);
        }
    };

    let records: Vec<_> = scan.collect();
    info!("[taskscan] Scan produced {} records", records.len());

    let serde_data = match serde_json::to_value(&records) {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not serialize scan results: {err:?}");
            return Err(ConfigError::Output);
        }
    };

    match output_results(&serde_data, "tasks", &config.output) {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("[taskscan] Could not output scan results: {err:?}");
            Err(ConfigError::Output)
        }
    }
}
