use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the bundled plant dataset. Fatal at startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("could not read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode dataset: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("duplicate plant id {0:?}")]
    DuplicateId(String),
    #[error("plant {id:?} has invalid width {width}")]
    InvalidWidth { id: String, width: f64 },
}

/// Failures of a completion request. Shown to the user; never retried.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("no API credential configured (set {0})")]
    MissingCredential(String),
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion API error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("no text in response")]
    EmptyResponse,
    #[error("could not decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("a recommendation request is already in progress")]
    InFlight,
}

/// Failures of the wiki thumbnail lookup. Logged, then degraded to "no image".
#[derive(Error, Debug)]
pub enum ImageLookupError {
    #[error("image lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image lookup returned {0}")]
    Status(u16),
    #[error("could not decode image lookup response: {0}")]
    Decode(#[from] serde_json::Error),
}
