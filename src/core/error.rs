use std::io;

#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Validation(String),
    Config(String),
    Http(String),
    Parse(String),
    Storage(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "IO Error: {}", err),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Config(msg) => write!(f, "Config Error: {}", msg),
            AppError::Http(msg) => write!(f, "HTTP Error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse Error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
pub type Result<T> = std::result::Result<T, AppError>;
