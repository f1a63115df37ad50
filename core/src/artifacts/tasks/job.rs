use crate::artifacts::tasks::error::TaskError;
use crate::artifacts::tasks::sections::{fixed::parse_fixed, variable::parse_variable};
use crate::filesystem::files::read_file;
use common::windows::TaskJob;
use log::error;

/// Parse a binary `Job` file at the provided path
pub(crate) fn grab_job_file(path: &str) -> Result<TaskJob, TaskError> {
    let data = match read_file(path) {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not read Job file {path}: {err:?}");
            return Err(TaskError::ReadFile);
        }
    };

    parse_job(&data, path)
}

/// Parse `Job` file bytes. The fixed section is followed by the variable section
pub(crate) fn parse_job(data: &[u8], path: &str) -> Result<TaskJob, TaskError> {
    let fixed_size = 68;
    if data.len() < fixed_size {
        return Err(TaskError::BadSignature);
    }

    let (variable_data, fixed) = match parse_fixed(data) {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not parse Job fixed section for {path}: {err:?}");
            return Err(TaskError::FixedSection);
        }
    };

    // Format version is always 1 and serves as the signature check
    let format_version = 1;
    if fixed.format_version != format_version || fixed.product_version == "Unknown" {
        return Err(TaskError::BadSignature);
    }
    if fixed.app_offset as usize > data.len() || fixed.triggers_offset as usize > data.len() {
        return Err(TaskError::OffsetOutOfRange);
    }

    let (_, variable) = match parse_variable(variable_data) {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not parse Job variable section for {path}: {err:?}");
            return Err(TaskError::VariableSection);
        }
    };

    let job = TaskJob {
        job_id: fixed.job_id,
        product_version: fixed.product_version,
        format_version: fixed.format_version,
        error_retry_count: fixed.error_retry_count,
        error_retry_interval: fixed.error_retry_interval,
        idle_deadline: fixed.idle_deadline,
        idle_wait: fixed.idle_wait,
        priority: fixed.priority,
        max_run_time: fixed.max_run_time,
        exit_code: fixed.exit_code,
        status: fixed.status,
        flags: fixed.flags,
        system_time: fixed.system_time,
        running_instance_count: variable.running_instance_count,
        application_name: variable.app_name,
        parameters: variable.parameters,
        working_directory: variable.working_directory,
        author: variable.author,
        comments: variable.comment,
        user_data: variable.user_data,
        start_error: variable.start_error,
        triggers: variable.triggers,
        path: path.to_string(),
    };

    Ok(job)
}
