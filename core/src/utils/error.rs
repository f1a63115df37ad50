use std::fmt;

#[derive(Debug)]
pub(crate) enum UtilError {
    ReadXml,
    UtfType,
    CreateDirectory,
    LogFile,
    OutputFile,
}

impl std::error::Error for UtilError {}

impl fmt::Display for UtilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilError::ReadXml => write!(f, "Failed to read XML file"),
            UtilError::UtfType => write!(f, "Failed to determine UTF16 type"),
            UtilError::CreateDirectory => write!(f, "Failed to create output directory"),
            UtilError::LogFile => write!(f, "Failed to create log file"),
            UtilError::OutputFile => write!(f, "Failed to create output file"),
        }
    }
}
