pub mod records;
pub mod windows;
