use super::{
    error::TaskError,
    schemas::{
        actions::parse_actions, principals::parse_principals, registration::parse_registration,
        settings::parse_settings, triggers::parse_triggers,
    },
};
use crate::utils::encoding::{base64_encode_standard, read_xml};
use common::windows::{Actions, TaskXml};
use log::error;
use quick_xml::{events::Event, Reader};

/// Parse Schedule Task XML files. Windows Vista and higher use XML for Tasks
pub(crate) fn grab_task_xml(path: &str) -> Result<TaskXml, TaskError> {
    // Read XML file at provided path. Tasks use UTF16 encoding
    let xml_result = read_xml(path);
    let xml_data = match xml_result {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not read Task XML file at {path}: {err:?}");
            return Err(TaskError::ReadXml);
        }
    };
    process_xml(&xml_data, path)
}

/// Parse the different parts of the XML schema format
pub(crate) fn process_xml(xml: &str, path: &str) -> Result<TaskXml, TaskError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut task_xml = TaskXml {
        registration_info: None,
        triggers: None,
        settings: None,
        data: None,
        principals: Vec::new(),
        actions: Actions {
            exec: Vec::new(),
            com_handler: Vec::new(),
            send_email: Vec::new(),
            show_message: Vec::new(),
        },
        path: path.to_string(),
    };

    let mut found_root = false;
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read xml data at {path}: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => {
                // The reader tokenizes leniently. Stray angle brackets show up as part of a tag name
                if !valid_element_name(tag.name().as_ref()) {
                    error!("[taskscan] Bad element name in xml data at {path}");
                    return Err(TaskError::InvalidXml);
                }
                match tag.name().as_ref() {
                    b"Task" => found_root = true,
                    b"RegistrationInfo" => {
                        task_xml.registration_info = Some(parse_registration(&mut reader)?);
                    }
                    b"Triggers" => {
                        task_xml.triggers = Some(parse_triggers(&mut reader)?);
                    }
                    b"Settings" => {
                        task_xml.settings = Some(parse_settings(&mut reader)?);
                    }
                    b"Principals" => {
                        task_xml.principals = parse_principals(&mut reader)?;
                    }
                    b"Actions" => {
                        task_xml.actions = parse_actions(&mut reader)?;
                    }
                    b"Data" => {
                        task_xml.data = Some(base64_encode_standard(
                            reader.read_text(tag.name()).unwrap_or_default().as_bytes(),
                        ));
                    }
                    _ => continue,
                }
            }
            Ok(Event::Empty(tag)) => {
                if !valid_element_name(tag.name().as_ref()) {
                    error!("[taskscan] Bad element name in xml data at {path}");
                    return Err(TaskError::InvalidXml);
                }
            }
            Ok(Event::End(tag)) => {
                if !valid_element_name(tag.name().as_ref()) {
                    error!("[taskscan] Bad element name in xml data at {path}");
                    return Err(TaskError::InvalidXml);
                }
            }
            _ => continue,
        }
    }

    // Anything without a Task root element is some other kind of XML
    if !found_root {
        return Err(TaskError::NotTaskXml);
    }

    Ok(task_xml)
}

/// Element names must start with a letter or underscore and stay within the XML name characters
fn valid_element_name(name: &[u8]) -> bool {
    let start = match name.first() {
        Some(value) => value,
        None => return false,
    };
    if !start.is_ascii_alphabetic() && *start != b'_' {
        return false;
    }
    name.iter()
        .all(|value| value.is_ascii_alphanumeric() || matches!(value, b'_' | b'-' | b'.' | b':'))
}
