use crate::utils::encoding::base64_encode_standard;
use log::warn;
use std::string::{FromUtf16Error, FromUtf8Error};

/// Get a UTF16 string from provided bytes data. Stops at the first null wide character
pub(crate) fn extract_utf16_string(data: &[u8]) -> String {
    let result = bytes_to_utf16_string(data);
    match result {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] Failed to get UTF16 string: {err:?}");
            base64_encode_standard(data)
        }
    }
}

/// Get a UTF16 string from provided bytes data
fn bytes_to_utf16_string(data: &[u8]) -> Result<String, FromUtf16Error> {
    let mut utf16_data: Vec<u16> = Vec::new();
    let min_byte_size = 2;
    for wide_char in data.chunks(min_byte_size) {
        if wide_char == [0, 0] || wide_char.len() < min_byte_size {
            break;
        }

        utf16_data.push(u16::from_le_bytes([wide_char[0], wide_char[1]]));
    }

    // Windows uses UTF16
    String::from_utf16(&utf16_data)
}

/// Get a UTF8 string from provided bytes data. Invalid UTF8 is base64 encoded
pub(crate) fn extract_utf8_string(data: &[u8]) -> String {
    let utf8_result = bytes_to_utf8_string(data);
    match utf8_result {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] Failed to get UTF8 string: {err:?}");
            base64_encode_standard(data)
        }
    }
}

/// Get a UTF8 string from provided bytes data
fn bytes_to_utf8_string(data: &[u8]) -> Result<String, FromUtf8Error> {
    let result = String::from_utf8(data.to_vec())?;
    let value = result.trim_end_matches('\0').to_string();
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{extract_utf16_string, extract_utf8_string};

    #[test]
    fn test_extract_utf16_string() {
        let test = [99, 0, 109, 0, 100, 0, 46, 0, 101, 0, 120, 0, 101, 0, 0, 0];
        let result = extract_utf16_string(&test);
        assert_eq!(result, "cmd.exe");
    }

    #[test]
    fn test_extract_utf8_string() {
        let test = [77, 111, 110, 100, 97, 121];
        let result = extract_utf8_string(&test);
        assert_eq!(result, "Monday");
    }
}
