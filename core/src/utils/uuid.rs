use uuid::Uuid;

/// Generate a random UUID for output filenames
pub(crate) fn generate_uuid() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Format 16 little endian GUID bytes into the standard string form
pub(crate) fn format_guid_le_bytes(data: &[u8]) -> String {
    let guid_size = 16;
    if data.len() < guid_size {
        return String::new();
    }

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        data[3], data[2], data[1], data[0],
        data[5], data[4],
        data[7], data[6],
        data[8], data[9],
        data[10], data[11], data[12], data[13], data[14], data[15]
    )
}
