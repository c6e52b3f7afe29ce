//! Ordered fallback chain over the price strategies.

use std::sync::Arc;

use agmarknet_api::PriceRecord;
use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::events::{EventSink, PipelineEvent, TracingSink};
use crate::params::RequestParams;
use crate::strategy::{
    ArchiveStrategy, FetchContext, LastResortStrategy, Strategy, SynthesizedStrategy,
    TrendsStrategy,
};

/// Runs strategies strictly in order and returns the first non-empty result.
///
/// Strategy errors never escape: they are reported to the sink and treated
/// as an empty result. The only error a caller can see is
/// [`PipelineError::Exhausted`], which the default chain cannot produce
/// because its last link always returns a record.
pub struct Pipeline {
    strategies: Vec<Box<dyn Strategy>>,
    sink: Arc<dyn EventSink>,
}

impl Pipeline {
    /// Default chain: trends report, synthesized history, archive report,
    /// then the last resort.
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_strategies(Self::default_chain(config), Arc::new(TracingSink))
    }

    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>, sink: Arc<dyn EventSink>) -> Self {
        Self { strategies, sink }
    }

    pub fn default_chain(config: &PipelineConfig) -> Vec<Box<dyn Strategy>> {
        vec![
            Box::new(TrendsStrategy::new(config.client())),
            Box::new(SynthesizedStrategy::new(config.fallback_days)),
            Box::new(ArchiveStrategy::new(config.client())),
            Box::new(LastResortStrategy::new(config.fallback_days)),
        ]
    }

    /// Replaces the event sink.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Strategy names in the order they will be tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Fetches prices as of the local calendar date.
    pub async fn fetch_prices(
        &self,
        params: &RequestParams,
    ) -> Result<Vec<PriceRecord>, PipelineError> {
        self.fetch_prices_on(params, chrono::Local::now().date_naive())
            .await
    }

    /// Fetches prices treating `today` as the current date.
    pub async fn fetch_prices_on(
        &self,
        params: &RequestParams,
        today: NaiveDate,
    ) -> Result<Vec<PriceRecord>, PipelineError> {
        self.sink.record(PipelineEvent::ChainStarted {
            state: params.state.clone(),
            commodity: params.commodity.clone(),
            market: params.market.clone(),
        });
        let ctx = FetchContext {
            today,
            sink: self.sink.as_ref(),
        };

        for strategy in &self.strategies {
            let name = strategy.name();
            self.sink
                .record(PipelineEvent::StrategyStarted { strategy: name });
            match strategy.fetch(params, &ctx).await {
                Ok(records) if !records.is_empty() => {
                    self.sink.record(PipelineEvent::StrategyYielded {
                        strategy: name,
                        records: records.len(),
                    });
                    return Ok(records);
                }
                Ok(_) => self
                    .sink
                    .record(PipelineEvent::StrategyEmpty { strategy: name }),
                Err(e) => self.sink.record(PipelineEvent::StrategyFailed {
                    strategy: name,
                    error: e.to_string(),
                }),
            }
        }

        self.sink.record(PipelineEvent::ChainExhausted);
        Err(PipelineError::Exhausted)
    }
}

/// One-shot lookup with configuration from the environment.
pub async fn fetch_prices(
    state: &str,
    commodity: &str,
    market: &str,
) -> Result<Vec<PriceRecord>, PipelineError> {
    let config = PipelineConfig::from_env();
    Pipeline::new(&config)
        .fetch_prices(&RequestParams::new(state, commodity, market))
        .await
}
