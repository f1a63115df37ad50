use crate::artifacts::tasks::error::TaskError;
use crate::utils::strings::extract_utf8_string;
use common::windows::{Actions, ComHandlerType, ExecType, SendEmailType, ShowMessageType};
use log::error;
use quick_xml::{events::Event, Reader};
use std::collections::HashMap;

/// Parse the `Actions` subtree of a Task. Any unrecognized action element
/// fails the whole file
pub(crate) fn parse_actions(reader: &mut Reader<&[u8]>) -> Result<Actions, TaskError> {
    let mut info = Actions {
        exec: Vec::new(),
        com_handler: Vec::new(),
        send_email: Vec::new(),
        show_message: Vec::new(),
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Actions xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Exec" => info.exec.push(process_exec(reader)?),
                b"ComHandler" => info.com_handler.push(process_com(reader)?),
                b"SendEmail" => info.send_email.push(process_email(reader)?),
                b"ShowMessage" => info.show_message.push(process_message(reader)?),
                _ => {
                    error!(
                        "[taskscan] Unknown action element: {}",
                        extract_utf8_string(tag.name().as_ref())
                    );
                    return Err(TaskError::UnknownAction);
                }
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Actions" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(info)
}

/// Parse `Exec` action options
fn process_exec(reader: &mut Reader<&[u8]>) -> Result<ExecType, TaskError> {
    let mut exec = ExecType {
        command: String::new(),
        arguments: None,
        working_directory: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Exec xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Command" => {
                    exec.command = reader.read_text(tag.name()).unwrap_or_default().to_string();
                }
                b"Arguments" => {
                    exec.arguments =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"WorkingDirectory" => {
                    exec.working_directory =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Exec" {
                    break;
                }
            }
            _ => (),
        }
    }

    // Command is required by the schema
    if exec.command.is_empty() {
        return Err(TaskError::MissingElement);
    }
    Ok(exec)
}

/// Parse `ComHandler` action options
fn process_com(reader: &mut Reader<&[u8]>) -> Result<ComHandlerType, TaskError> {
    let mut com = ComHandlerType {
        class_id: String::new(),
        data: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read ComHandler xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"ClassId" => {
                    com.class_id = reader.read_text(tag.name()).unwrap_or_default().to_string();
                }
                b"Data" => {
                    com.data = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ComHandler" {
                    break;
                }
            }
            _ => (),
        }
    }

    if com.class_id.is_empty() {
        return Err(TaskError::MissingElement);
    }
    Ok(com)
}

/// Parse the deprecated `SendEmail` action options
fn process_email(reader: &mut Reader<&[u8]>) -> Result<SendEmailType, TaskError> {
    let mut email = SendEmailType {
        server: None,
        subject: None,
        to: None,
        cc: None,
        bcc: None,
        reply_to: None,
        from: None,
        header_fields: None,
        body: None,
        attachment: None,
    };

    let mut headers: HashMap<String, String> = HashMap::new();
    let mut attachments = Vec::new();
    let mut header_name = String::new();
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read SendEmail xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Server" => {
                    email.server =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Subject" => {
                    email.subject =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"To" => {
                    email.to = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Cc" => {
                    email.cc = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Bcc" => {
                    email.bcc = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"ReplyTo" => {
                    email.reply_to =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"From" => {
                    email.from = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Body" => {
                    email.body = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Name" => {
                    header_name = reader.read_text(tag.name()).unwrap_or_default().to_string();
                }
                b"Value" => {
                    let value = reader.read_text(tag.name()).unwrap_or_default().to_string();
                    headers.insert(std::mem::take(&mut header_name), value);
                }
                b"File" => {
                    attachments.push(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"SendEmail" {
                    break;
                }
            }
            _ => (),
        }
    }

    if !headers.is_empty() {
        email.header_fields = Some(headers);
    }
    if !attachments.is_empty() {
        email.attachment = Some(attachments);
    }
    Ok(email)
}

/// Parse the deprecated `ShowMessage` action options
fn process_message(reader: &mut Reader<&[u8]>) -> Result<ShowMessageType, TaskError> {
    let mut message = ShowMessageType {
        title: None,
        body: String::new(),
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read ShowMessage xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Title" => {
                    message.title =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Body" => {
                    message.body = reader.read_text(tag.name()).unwrap_or_default().to_string();
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ShowMessage" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(message)
}
