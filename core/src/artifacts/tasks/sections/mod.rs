pub(crate) mod fixed;
pub(crate) mod variable;
