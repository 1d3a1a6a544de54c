use thiserror::Error;

/// Fatal errors raised while reading configuration or input tables
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(String),
    #[error("csv error: {0}")]
    Csv(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("library {library}: invalid {field} {value:?}")]
    InvalidCoordinate {
        library: String,
        field: &'static str,
        value: String,
    },
}

impl From<std::io::Error> for LoadError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

/// Errors that prevent planning from starting
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("start library {0:?} is not among the loaded libraries")]
    UnknownStart(String),
}
