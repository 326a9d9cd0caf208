use thiserror::Error;

/// Rowdesk unified error type
#[derive(Error, Debug)]
pub enum RowdeskError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Data error: {message}")]
    Data { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Terminal error: {0}")]
    Tui(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl RowdeskError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::Data { message: message.into() }
    }
}

pub type RowdeskResult<T> = Result<T, RowdeskError>;
