//! Price lookup pipeline for the AgMarknet portal.
//!
//! Wraps the `agmarknet_api` client with name-to-code resolution, a
//! deterministic fallback synthesizer and an ordered strategy chain that
//! always hands the caller some records.

pub mod codes;
pub mod config;
pub mod error;
pub mod events;
pub mod params;
pub mod pipeline;
pub mod strategy;
pub mod synth;
pub mod validation;

pub use agmarknet_api;
pub use agmarknet_api::PriceRecord;

pub use config::PipelineConfig;
pub use error::{CodeKind, PipelineError};
pub use events::{EventSink, MemorySink, PipelineEvent, TracingSink};
pub use params::RequestParams;
pub use pipeline::{fetch_prices, Pipeline};
pub use strategy::{
    ArchiveStrategy, FetchContext, LastResortStrategy, Strategy, SynthesizedStrategy,
    TrendsStrategy,
};
