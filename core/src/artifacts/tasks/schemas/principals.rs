use crate::artifacts::tasks::error::TaskError;
use common::windows::Principals;
use log::error;
use quick_xml::events::BytesStart;
use quick_xml::{events::Event, Reader};

/// Parse the `Principals` subtree of a Task
pub(crate) fn parse_principals(reader: &mut Reader<&[u8]>) -> Result<Vec<Principals>, TaskError> {
    let mut principals = Vec::new();

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Principals xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => {
                if tag.name().as_ref() == b"Principal" {
                    principals.push(parse_principal(&tag, reader)?);
                }
            }
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Principals" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(principals)
}

/// Parse one `Principal`. The `id` is an attribute on the element itself
fn parse_principal(
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
) -> Result<Principals, TaskError> {
    let mut principal = Principals {
        id_attribute: id_attribute(start),
        user_id: None,
        logon_type: None,
        group_id: None,
        display_name: None,
        run_level: None,
        process_token_sid_type: None,
        required_privileges: None,
    };

    let mut privileges = Vec::new();
    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read Principal xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"UserId" => {
                    principal.user_id =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"LogonType" => {
                    principal.logon_type =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"GroupId" => {
                    principal.group_id =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"DisplayName" => {
                    principal.display_name =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"RunLevel" => {
                    principal.run_level =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"ProcessTokenSidType" => {
                    principal.process_token_sid_type =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Privilege" => {
                    privileges.push(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Principal" {
                    break;
                }
            }
            _ => (),
        }
    }

    if !privileges.is_empty() {
        principal.required_privileges = Some(privileges);
    }
    Ok(principal)
}

/// Pull the optional `id` attribute off an element
pub(crate) fn id_attribute(tag: &BytesStart<'_>) -> Option<String> {
    let attribute = tag.try_get_attribute("id").ok()??;
    let value = attribute.unescape_value().ok()?;
    Some(value.to_string())
}
