use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// No document tree could be built from the input.
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
