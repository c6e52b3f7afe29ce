//! Structured pipeline events and the sinks that receive them.
//!
//! Strategies and the orchestrator report what happened through an
//! [`EventSink`] handed to them, rather than logging to a global. The default
//! [`TracingSink`] forwards to `tracing`; [`MemorySink`] keeps events for
//! inspection.

use std::sync::Mutex;

use crate::error::CodeKind;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    ChainStarted {
        state: String,
        commodity: String,
        market: String,
    },
    StrategyStarted {
        strategy: &'static str,
    },
    StrategyYielded {
        strategy: &'static str,
        records: usize,
    },
    StrategyEmpty {
        strategy: &'static str,
    },
    StrategyFailed {
        strategy: &'static str,
        error: String,
    },
    CodeNotFound {
        kind: CodeKind,
        name: String,
        suggestion: Option<&'static str>,
    },
    ChainExhausted,
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: PipelineEvent);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::ChainStarted {
                state,
                commodity,
                market,
            } => tracing::info!(%state, %commodity, %market, "Fetching prices"),
            PipelineEvent::StrategyStarted { strategy } => {
                tracing::info!(strategy, "Trying strategy")
            }
            PipelineEvent::StrategyYielded { strategy, records } => {
                tracing::info!(strategy, records, "Strategy returned data")
            }
            PipelineEvent::StrategyEmpty { strategy } => {
                tracing::info!(strategy, "Strategy returned no data, falling through")
            }
            PipelineEvent::StrategyFailed { strategy, error } => {
                tracing::error!(strategy, %error, "Strategy failed, falling through")
            }
            PipelineEvent::CodeNotFound {
                kind,
                name,
                suggestion,
            } => match suggestion {
                Some(s) => tracing::warn!(%kind, %name, "Could not find code (did you mean '{}'?)", s),
                None => tracing::warn!(%kind, %name, "Could not find code"),
            },
            PipelineEvent::ChainExhausted => tracing::error!("Every strategy came back empty"),
        }
    }
}

/// Collects events in memory, in the order they were recorded.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Names of strategies that were started, in order.
    pub fn strategies_tried(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::StrategyStarted { strategy } => Some(strategy),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: PipelineEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
