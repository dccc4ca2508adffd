use thiserror::Error;

pub(crate) const MISSING_DEFINITIONS: &str = "no bpmn:definitions element found";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to write XML: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("not a BPMN document: {0}")]
    NotBpmn(String),
    #[error("import failed: {0}")]
    Import(String),
}
