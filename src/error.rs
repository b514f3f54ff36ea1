//! Error types.

use crate::enums::StoreKey;
use std::fmt;

/// Any error that can occur while fetching offers or talking to the polling task.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unexpected response: {}", .0)]
    Response(String),
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("Error {}", .0)]
    Http(reqwest::StatusCode),
    #[error("Invalid URL: {}", .0)]
    Url(#[from] url::ParseError),
    #[error("Polling is not set up")]
    PollingNotSetup,
    #[error("Polling buffer is full")]
    PollingBufferFull,
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

/// An error writing or reading a state store's backing file.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Filesystem error: {}", .0)]
    FileSystem(#[from] std::io::Error),
    #[error("Error parsing file contents: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("No data directory could be determined for this platform")]
    NoDataDirectory,
}

/// A fetched offer that an ID cannot be derived from.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct MalformedOfferError {
    /// The field that was missing, null or of the wrong type, e.g. `seller.date`.
    pub field: &'static str,
    /// The position of the offer in the fetched list, when known.
    pub index: Option<usize>,
}

impl MalformedOfferError {
    pub(crate) fn missing(field: &'static str) -> Self {
        Self {
            field,
            index: None,
        }
    }
    
    /// Attaches the offer's position in the fetched list.
    pub fn at(self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }
}

impl fmt::Display for MalformedOfferError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "Offer at position {index} has no usable {}", self.field),
            None => write!(f, "Offer has no usable {}", self.field),
        }
    }
}

/// A persisted value that could not be parsed. The value is treated as empty.
#[derive(thiserror::Error, Debug)]
#[error("Corrupt state under key \"{key}\": {source}")]
pub struct CorruptStateError {
    pub key: StoreKey,
    #[source]
    pub source: serde_json::Error,
}
