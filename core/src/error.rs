use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    ReadFile,
    BadToml,
    NoTarget,
    Logging,
    Scan,
    Output,
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFile => write!(f, "Could not read config file"),
            ConfigError::BadToml => write!(f, "Could not parse TOML config"),
            ConfigError::NoTarget => write!(f, "No target root or file provided"),
            ConfigError::Logging => write!(f, "Could not setup logging"),
            ConfigError::Scan => write!(f, "Could not scan scheduled tasks"),
            ConfigError::Output => write!(f, "Could not output scan results"),
        }
    }
}
