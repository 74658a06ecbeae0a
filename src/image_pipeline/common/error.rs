use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Failed to discover queries: {0}")]
    Discovery(String),

    #[error("Failed to execute query: {0}")]
    QueryExecution(String),

    #[error("Result set cannot be reshaped into an image: {0}")]
    Shape(String),

    #[error("Invalid pixel record: {0}")]
    InvalidRecord(String),

    #[error("Cannot render a composite from an empty image sequence")]
    EmptyImageSequence,

    #[error("Failed to write output image: {0}")]
    Persistence(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DrawError>;
