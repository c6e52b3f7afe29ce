//! The three free-text inputs of a price lookup.

use crate::error::PipelineError;
use crate::validation::{sanitize_text, MAX_PARAM_LENGTH};

/// State, commodity and market as the caller typed them.
///
/// Matching against the code tables is case-insensitive, but the original
/// strings are kept because several strategies echo them into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub state: String,
    pub commodity: String,
    pub market: String,
}

impl RequestParams {
    pub fn new(state: &str, commodity: &str, market: &str) -> Self {
        Self {
            state: state.to_string(),
            commodity: commodity.to_string(),
            market: market.to_string(),
        }
    }

    /// Builds params from untrusted input: strips control characters, trims
    /// and rejects empty or oversized values.
    pub fn validated(state: &str, commodity: &str, market: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            state: field("state", state)?,
            commodity: field("commodity", commodity)?,
            market: field("market", market)?,
        })
    }
}

fn field(name: &str, value: &str) -> Result<String, PipelineError> {
    sanitize_text(value, MAX_PARAM_LENGTH).map_err(|e| match e {
        PipelineError::InvalidInput(msg) => PipelineError::InvalidInput(format!("{} {}", name, msg)),
        other => other,
    })
}
