/**
 * Windows Schedule Tasks keep persistence entries popular with both admins and malware.
 * Two formats exist, the XML format used since Vista and the binary `Job` format used
 * by older Windows releases (and still honored via the Registry).
 *
 * Both formats normalize into one canonical record shape.
 *
 * References:
 * `https://learn.microsoft.com/en-us/windows/win32/taskschd/about-the-task-scheduler`
 * `https://github.com/libyal/dtformats/blob/main/documentation/Job%20file%20format.asciidoc`
 */
use crate::artifacts::tasks::discovery::discover_task_files;
use crate::artifacts::tasks::error::TaskError;
use crate::artifacts::tasks::job::grab_job_file;
use crate::artifacts::tasks::normalize::{normalize_job, normalize_xml};
use crate::artifacts::tasks::xml::grab_task_xml;
use crate::filesystem::files::file_extension;
use crate::structs::config::TasksOptions;
use chrono::{FixedOffset, Offset, Utc};
use common::records::{TaskGroup, TaskOutput};
use log::warn;
use std::collections::VecDeque;

/// Lazy stream of task records. Each source file is decoded only when the
/// iterator reaches it, and a file that fails to decode is skipped
pub struct TaskScan {
    files: std::vec::IntoIter<String>,
    pending: VecDeque<TaskOutput>,
    group: bool,
    offset: FixedOffset,
}

/// Discover and decode Schedule Tasks, returning a lazy record stream.
/// With `alt_file` set only that file is scanned, otherwise the standard
/// task locations under `target_root` are walked
pub fn scan_tasks(options: &TasksOptions) -> Result<TaskScan, TaskError> {
    let offset = match FixedOffset::east_opt(options.tz_offset_seconds) {
        Some(result) => result,
        None => {
            warn!(
                "[taskscan] Zone offset {} seconds out of range, using UTC",
                options.tz_offset_seconds
            );
            Utc.fix()
        }
    };

    let files = if let Some(alt_file) = options.alt_file.as_ref() {
        vec![alt_file.clone()]
    } else if let Some(root) = options.target_root.as_ref() {
        discover_task_files(root)?
    } else {
        return Err(TaskError::NoTarget);
    };

    Ok(TaskScan {
        files: files.into_iter(),
        pending: VecDeque::new(),
        group: options.group,
        offset,
    })
}

impl Iterator for TaskScan {
    type Item = TaskOutput;

    fn next(&mut self) -> Option<TaskOutput> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(record);
            }

            let path = self.files.next()?;
            let group = match scan_file(&path, &self.offset) {
                Ok(result) => result,
                Err(err) => {
                    warn!("{}", skip_message(&path, &err));
                    continue;
                }
            };

            if self.group {
                return Some(TaskOutput::Group(group));
            }

            // Flat mode keeps per-file order, task first
            self.pending.push_back(TaskOutput::Task(group.task));
            for trigger in group.triggers {
                self.pending.push_back(TaskOutput::Trigger(trigger));
            }
            for action in group.actions {
                self.pending.push_back(TaskOutput::Action(action));
            }
        }
    }
}

/// Skip line logged for a file that fails to decode. Log review tooling keys on this text
fn skip_message(path: &str, err: &TaskError) -> String {
    format!("[taskscan] Invalid task file encountered: {path}: {err:?}")
}

/// Route one file by extension. Everything that is not a `Job` file is
/// treated as Task XML
fn scan_file(path: &str, offset: &FixedOffset) -> Result<TaskGroup, TaskError> {
    if file_extension(path) == "job" {
        let job = grab_job_file(path)?;
        return Ok(normalize_job(job, offset));
    }

    let task_xml = grab_task_xml(path)?;
    Ok(normalize_xml(task_xml, offset))
}
