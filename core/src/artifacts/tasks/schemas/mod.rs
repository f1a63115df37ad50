pub(crate) mod actions;
pub(crate) mod principals;
pub(crate) mod registration;
pub(crate) mod settings;
pub(crate) mod triggers;
