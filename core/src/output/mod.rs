use crate::structs::config::Output;
use crate::utils::error::UtilError;
use crate::utils::uuid::generate_uuid;
use log::error;
use serde_json::Value;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;

/// Write scan results to the local directory provided by the TOML config.
/// `json` writes one array file, `jsonl` writes one record per line
pub(crate) fn output_results(
    serde_data: &Value,
    output_name: &str,
    output: &Output,
) -> Result<(), UtilError> {
    let output_path = format!("{}/{}", output.directory, output.name);
    let result = create_dir_all(&output_path);
    if let Err(err) = result {
        error!("[taskscan] Failed to create output directory {output_path}: {err:?}");
        return Err(UtilError::CreateDirectory);
    }

    let extension = if output.format == "jsonl" {
        "jsonl"
    } else {
        "json"
    };
    let uuid = generate_uuid();
    let file_path = format!("{output_path}/{uuid}.{extension}");

    let file_result = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&file_path);
    let mut out_file = match file_result {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Failed to create output file {file_path}: {err:?}");
            return Err(UtilError::OutputFile);
        }
    };

    let write_result = if extension == "jsonl" {
        write_lines(&mut out_file, serde_data)
    } else {
        serde_json::to_string(serde_data)
            .map_err(std::io::Error::other)
            .and_then(|value| out_file.write_all(value.as_bytes()))
    };
    if let Err(err) = write_result {
        error!("[taskscan] Failed to write output file {file_path}: {err:?}");
        return Err(UtilError::OutputFile);
    }

    record_status(&output_path, output_name, &format!("{uuid}.{extension}"))
}

/// Write each element of a JSON array as its own line
fn write_lines(out_file: &mut std::fs::File, serde_data: &Value) -> Result<(), std::io::Error> {
    let empty = Vec::new();
    let entries = serde_data.as_array().unwrap_or(&empty);
    for entry in entries {
        let line = serde_json::to_string(entry).map_err(std::io::Error::other)?;
        out_file.write_all(line.as_bytes())?;
        out_file.write_all(b"\n")?;
    }
    Ok(())
}

/// Track the files written for each scan in a status log
fn record_status(output_path: &str, output_name: &str, filename: &str) -> Result<(), UtilError> {
    let status_result = OpenOptions::new()
        .append(true)
        .create(true)
        .open(format!("{output_path}/status.log"));
    let mut status_file = match status_result {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Failed to open status log at {output_path}: {err:?}");
            return Err(UtilError::OutputFile);
        }
    };

    let write_result = status_file.write_all(format!("{output_name}:{filename}\n").as_bytes());
    if let Err(err) = write_result {
        error!("[taskscan] Failed to update status log at {output_path}: {err:?}");
        return Err(UtilError::OutputFile);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::output_results;
    use crate::structs::config::Output;
    use serde_json::json;

    #[test]
    fn test_output_results_json() {
        let output = Output {
            name: String::from("output_test"),
            directory: std::env::temp_dir().display().to_string(),
            format: String::from("json"),
            logging: None,
        };

        let data = json!([{"uri": "\\At1"}]);
        output_results(&data, "tasks", &output).unwrap();
    }

    #[test]
    fn test_output_results_jsonl() {
        let output = Output {
            name: String::from("output_test"),
            directory: std::env::temp_dir().display().to_string(),
            format: String::from("jsonl"),
            logging: None,
        };

        let data = json!([{"uri": "\\At1"}, {"uri": "\\At2"}]);
        output_results(&data, "tasks", &output).unwrap();
    }
}
