//! Error types for response parsing

use thiserror::Error;

/// Failure to turn a response body into a model
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("response is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML response: {0}")]
    Xml(#[from] roxmltree::Error),
}
