use std::fmt;

#[derive(Debug)]
pub enum TaskError {
    ReadFile,
    BadSignature,
    FixedSection,
    VariableSection,
    OffsetOutOfRange,
    ReadXml,
    InvalidXml,
    NotTaskXml,
    MissingElement,
    UnknownTrigger,
    UnknownAction,
    Glob,
    NoTarget,
}

impl std::error::Error for TaskError {}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::ReadFile => write!(f, "Could not read task file"),
            TaskError::BadSignature => write!(f, "Not a scheduled task Job file"),
            TaskError::FixedSection => write!(f, "Could not parse Job fixed section"),
            TaskError::VariableSection => write!(f, "Could not parse Job variable section"),
            TaskError::OffsetOutOfRange => write!(f, "Job section offset beyond file size"),
            TaskError::ReadXml => write!(f, "Could not read Task XML file"),
            TaskError::InvalidXml => write!(f, "Could not parse Task XML file"),
            TaskError::NotTaskXml => write!(f, "XML file is not a scheduled task"),
            TaskError::MissingElement => write!(f, "Task XML missing required element"),
            TaskError::UnknownTrigger => write!(f, "Unknown Task trigger"),
            TaskError::UnknownAction => write!(f, "Unknown Task action"),
            TaskError::Glob => write!(f, "Could not glob task locations"),
            TaskError::NoTarget => write!(f, "No target root or file provided"),
        }
    }
}
