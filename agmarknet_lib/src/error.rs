//! Error types for the pipeline layer.

use std::fmt;

/// Which lookup table a code miss came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    State,
    Commodity,
    Market,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => f.write_str("state"),
            Self::Commodity => f.write_str("commodity"),
            Self::Market => f.write_str("market"),
        }
    }
}

/// Errors produced by the pipeline layer.
///
/// Strategy failures are absorbed by the orchestrator; only [`Exhausted`]
/// ever reaches a caller of [`crate::Pipeline::fetch_prices`].
///
/// [`Exhausted`]: PipelineError::Exhausted
#[derive(Debug)]
pub enum PipelineError {
    /// A network, status or markup failure from the portal client.
    Portal(agmarknet_api::Error),
    /// A name had no entry in the static code tables.
    NotFound { kind: CodeKind, name: String },
    /// The synthesizer could not build its records.
    Synthesis(String),
    /// Every strategy in the chain came back empty.
    Exhausted,
    /// Configuration could not be read or parsed.
    Config(String),
    /// Caller-supplied input failed validation.
    InvalidInput(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portal(e) => write!(f, "Portal error: {}", e),
            Self::NotFound { kind, name } => write!(f, "No {} code for '{}'", kind, name),
            Self::Synthesis(msg) => write!(f, "Synthesis error: {}", msg),
            Self::Exhausted => write!(f, "No strategy produced price data"),
            Self::Config(msg) => write!(f, "Config error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Portal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<agmarknet_api::Error> for PipelineError {
    fn from(e: agmarknet_api::Error) -> Self {
        Self::Portal(e)
    }
}

impl From<toml::de::Error> for PipelineError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
