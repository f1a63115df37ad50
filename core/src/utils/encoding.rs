use super::{
    error::UtilError,
    nom_helper::{nom_unsigned_two_bytes, Endian},
    strings::{extract_utf16_string, extract_utf8_string},
};
use crate::filesystem::files::read_file;
use base64::{engine::general_purpose, Engine};
use log::error;

/// Base64 encode data using the STANDARD engine (alphabet along with "+" and "/")
pub(crate) fn base64_encode_standard(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Read a XML file. This function will check for UTF16 encoding via Byte Order Mark (BOM)
pub(crate) fn read_xml(path: &str) -> Result<String, UtilError> {
    let bytes_result = read_file(path);
    let bytes = match bytes_result {
        Ok(result) => result,
        Err(err) => {
            error!("[taskscan] Could not read XML file at {path}: {err:?}");
            return Err(UtilError::ReadXml);
        }
    };

    let utf_check = nom_unsigned_two_bytes(&bytes, Endian::Be);
    let (data, utf_status) = match utf_check {
        Ok(result) => result,
        Err(_err) => {
            error!("[taskscan] Could not determine UTF encoding for XML {path}");
            return Err(UtilError::UtfType);
        }
    };

    let utf16_le = 0xfffe;
    let utf16_be = 0xfeff;

    let xml_string = if utf_status == utf16_be || utf_status == utf16_le {
        extract_utf16_string(data)
    } else {
        extract_utf8_string(&bytes)
    };

    Ok(xml_string)
}
