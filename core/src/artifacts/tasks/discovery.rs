use crate::artifacts::tasks::error::TaskError;
use crate::filesystem::files::is_directory;
use crate::filesystem::metadata::glob_paths;
use log::error;

/// Glob fragments under the target root where Windows keeps Schedule Tasks.
/// Group Policy preference files live outside the Tasks directories
const TASK_LOCATIONS: [&str; 7] = [
    "Windows/System32/Tasks/**/*",
    "Windows/System32/Tasks_Migrated/**/*",
    "Windows/SysWOW64/Tasks/**/*",
    "Windows/Tasks/*",
    "Windows/System32/GroupPolicy/DataStore/*/Machine/Preferences/ScheduledTasks/*",
    "Windows/System32/GroupPolicy/DataStore/*/User/Preferences/ScheduledTasks/*",
    "ProgramData/Microsoft/Group Policy/*/Preferences/ScheduledTasks/*",
];

/// Walk the known task locations under `root` and return every file found.
/// Directories matched by the recursive patterns are skipped
pub(crate) fn discover_task_files(root: &str) -> Result<Vec<String>, TaskError> {
    if !is_directory(root) {
        error!("[taskscan] Target root {root} is not a directory");
        return Err(TaskError::NoTarget);
    }

    let mut files = Vec::new();
    for location in TASK_LOCATIONS {
        let glob_result = glob_paths(&format!("{root}/{location}"));
        let paths = match glob_result {
            Ok(result) => result,
            Err(err) => {
                error!("[taskscan] Could not glob {location} under {root}: {err:?}");
                return Err(TaskError::Glob);
            }
        };

        for entry in paths {
            if entry.is_file {
                files.push(entry.full_path);
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{discover_task_files, TaskError};
    use std::fs::{create_dir_all, write};
    use std::path::PathBuf;

    fn fixture_root(name: &str) -> PathBuf {
        let mut root = std::env::temp_dir();
        root.push(name);
        root
    }

    #[test]
    fn test_discover_task_files() {
        let root = fixture_root("taskscan_discovery");
        let tasks = root.join("Windows/System32/Tasks/Microsoft/Windows/Defrag");
        create_dir_all(&tasks).unwrap();
        write(tasks.join("ScheduledDefrag"), "<Task></Task>").unwrap();
        write(
            root.join("Windows/System32/Tasks/CreateExplorerShellUnelevatedTask"),
            "<Task></Task>",
        )
        .unwrap();

        let legacy = root.join("Windows/Tasks");
        create_dir_all(&legacy).unwrap();
        write(legacy.join("At1.job"), [0u8; 10]).unwrap();

        let results = discover_task_files(&root.display().to_string()).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().any(|path| path.ends_with("ScheduledDefrag")));
        assert!(results
            .iter()
            .any(|path| path.ends_with("CreateExplorerShellUnelevatedTask")));
        assert!(results.iter().any(|path| path.ends_with("At1.job")));
    }

    #[test]
    fn test_discover_task_files_bad_root() {
        let result = discover_task_files("/no/such/root/anywhere");
        assert!(matches!(result, Err(TaskError::NoTarget)));
    }
}
