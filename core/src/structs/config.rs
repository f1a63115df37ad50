use serde::Deserialize;

/// Scan settings parsed from a TOML config file
#[derive(Debug, Deserialize)]
pub struct ScanConfig {
    pub target: TargetOptions,
    pub output: Output,
}

#[derive(Debug, Deserialize)]
pub struct TargetOptions {
    /// Root of the mounted target filesystem (Ex: /mnt/evidence/C)
    pub root: Option<String>,
    /// Scan a single task file instead of the standard locations
    pub alt_file: Option<String>,
    /// Emit grouped records instead of flat per-row records
    pub group: Option<bool>,
    /// Offset of the target system local zone, in seconds east of UTC
    pub tz_offset_seconds: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    pub name: String,
    pub directory: String,
    /// Either "json" or "jsonl"
    pub format: String,
    pub logging: Option<String>,
}

/// Options for a single scheduled task scan
pub struct TasksOptions {
    pub target_root: Option<String>,
    pub alt_file: Option<String>,
    pub group: bool,
    pub tz_offset_seconds: i32,
}

impl Default for TasksOptions {
    fn default() -> Self {
        TasksOptions {
            target_root: None,
            alt_file: None,
            group: true,
            tz_offset_seconds: 0,
        }
    }
}
