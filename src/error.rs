use std::path::PathBuf;

use thiserror::Error;

/// The user cancelled the picker or chose something that is not an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Please select an image file.")]
    NoFile,

    #[error("Please select an image file.")]
    NotAnImage(PathBuf),
}

/// The selected image could not be read into memory.
#[derive(Error, Debug)]
#[error("Failed to read image {}: {source}", .path.display())]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Could not reach the API: {0}")]
    Connection(String),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Every way an estimation cycle can fail.
///
/// The `Display` output is exactly what ends up in the error banner.
#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Failed to estimate calories: {0}")]
    Read(#[from] ReadError),

    #[error("Failed to estimate calories: {0}")]
    Network(#[from] NetworkError),

    #[error("Failed to estimate calories: API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to estimate calories: Malformed API response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Failed to parse JSON response: {source}. Raw response: {raw}")]
    Parse {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
