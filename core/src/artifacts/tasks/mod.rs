pub(crate) mod discovery;
pub(crate) mod error;
pub(crate) mod job;
pub(crate) mod normalize;
pub(crate) mod parser;
mod sections;
mod schemas;
pub(crate) mod xml;
