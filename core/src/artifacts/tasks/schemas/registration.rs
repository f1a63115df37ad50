use crate::artifacts::tasks::error::TaskError;
use common::windows::RegistrationInfo;
use log::error;
use quick_xml::{events::Event, Reader};

/// Parse the `RegistrationInfo` subtree of a Task
pub(crate) fn parse_registration(reader: &mut Reader<&[u8]>) -> Result<RegistrationInfo, TaskError> {
    let mut info = RegistrationInfo {
        uri: None,
        security_descriptor: None,
        source: None,
        date: None,
        author: None,
        version: None,
        description: None,
        documentation: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[taskscan] Could not read RegistrationInfo xml data: {err:?}");
                return Err(TaskError::InvalidXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"URI" => {
                    info.uri = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"SecurityDescriptor" => {
                    info.security_descriptor =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Source" => {
                    info.source =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Date" => {
                    info.date = Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Author" => {
                    info.author =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Version" => {
                    info.version =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Description" => {
                    info.description =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                b"Documentation" => {
                    info.documentation =
                        Some(reader.read_text(tag.name()).unwrap_or_default().to_string());
                }
                _ => (),
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"RegistrationInfo" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::parse_registration;
    use quick_xml::Reader;

    #[test]
    fn test_parse_registration() {
        let xml = r#"
          <Date>2019-10-21T12:26:22.0000000</Date>
          <Author>Microsoft Corporation</Author>
          <URI>\Microsoft\Windows\Chkdsk\SyspartRepair</URI>
             "#;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let result = parse_registration(&mut reader).unwrap();
        assert_eq!(result.date.unwrap(), "2019-10-21T12:26:22.0000000");
        assert_eq!(result.author.unwrap(), "Microsoft Corporation");
        assert_eq!(
            result.uri.unwrap(),
            "\\Microsoft\\Windows\\Chkdsk\\SyspartRepair"
        );
        assert_eq!(result.version, None);
    }
}
