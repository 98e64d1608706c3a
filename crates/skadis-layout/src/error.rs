use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("\"{field}\" must be a finite number")]
    NonFinite { field: &'static str },

    #[error("\"{field}\" must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("\"{field}\" must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read parameters from {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse parameters: {0}")]
    Parse(#[from] serde_yaml::Error),
}
