pub mod core;

mod artifacts;
mod error;
mod filesystem;
mod output;
mod structs;
mod utils;

pub use crate::artifacts::tasks::error::TaskError;
pub use crate::artifacts::tasks::parser::{scan_tasks, TaskScan};
pub use crate::error::ConfigError;
pub use crate::structs::config::{Output, ScanConfig, TargetOptions, TasksOptions};
