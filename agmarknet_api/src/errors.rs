//! Error types for the portal client.

/// Errors that can occur while talking to the portal or reading its markup.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Connection, DNS, timeout or body-read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The portal answered with a non-success status.
    #[error("request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A hidden form field needed for the POST was not on the page.
    #[error("missing form token {0}")]
    MissingToken(&'static str),
    /// The markup did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
    /// A request URL could not be built from the configured base.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// True for transport-level failures (connection, timeout, non-2xx).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus { .. })
    }

    /// True when the portal responded but its markup could not be used.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::MissingToken(_) | Self::Parse(_))
    }
}
