//! The interchangeable ways of producing price records.
//!
//! Each strategy answers the same question with the same signature; the
//! [`crate::Pipeline`] tries them in order until one returns records.
//! Returning `Ok(vec![])` means "nothing here, try the next one", and so
//! does any `Err`.

use agmarknet_api::{ArchiveQuery, PortalClient, PriceRecord, TrendsQuery};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::codes;
use crate::error::{CodeKind, PipelineError};
use crate::events::{EventSink, PipelineEvent};
use crate::params::RequestParams;
use crate::synth;

/// Per-invocation context shared by every strategy in a chain run.
pub struct FetchContext<'a> {
    /// Date the run treats as "today".
    pub today: NaiveDate,
    pub sink: &'a dyn EventSink,
}

#[async_trait]
pub trait Strategy: Send + Sync {
    /// Short stable name used in events.
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        params: &RequestParams,
        ctx: &FetchContext<'_>,
    ) -> Result<Vec<PriceRecord>, PipelineError>;
}

/// Turns a lookup result into an optional code, reporting misses to the sink.
fn resolved(
    ctx: &FetchContext<'_>,
    lookup: Result<&'static str, PipelineError>,
    state_code: Option<&str>,
) -> Option<&'static str> {
    match lookup {
        Ok(code) => Some(code),
        Err(PipelineError::NotFound { kind, name }) => {
            let suggestion = codes::suggest(kind, &name, state_code);
            ctx.sink.record(PipelineEvent::CodeNotFound {
                kind,
                name,
                suggestion,
            });
            None
        }
        Err(other) => {
            tracing::error!("Unexpected lookup failure: {}", other);
            None
        }
    }
}

/// Monthly price-trends report, filtered to the requested market.
pub struct TrendsStrategy {
    client: PortalClient,
}

impl TrendsStrategy {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Strategy for TrendsStrategy {
    fn name(&self) -> &'static str {
        "trends"
    }

    async fn fetch(
        &self,
        params: &RequestParams,
        ctx: &FetchContext<'_>,
    ) -> Result<Vec<PriceRecord>, PipelineError> {
        let state_code = resolved(ctx, codes::resolve_state(&params.state), None);
        let commodity_code = resolved(ctx, codes::resolve_commodity(&params.commodity), None);
        let (Some(state_code), Some(commodity_code)) = (state_code, commodity_code) else {
            return Ok(Vec::new());
        };

        let query = TrendsQuery::for_month_of(ctx.today, state_code, commodity_code);
        Ok(self
            .client
            .price_trends(&query, &params.commodity, &params.market)
            .await?)
    }
}

/// Daily archive report; needs state, commodity and market codes.
pub struct ArchiveStrategy {
    client: PortalClient,
    lookback_days: u64,
}

impl ArchiveStrategy {
    /// Days before today the report range starts at.
    pub const DEFAULT_LOOKBACK_DAYS: u64 = 7;

    pub fn new(client: PortalClient) -> Self {
        Self {
            client,
            lookback_days: Self::DEFAULT_LOOKBACK_DAYS,
        }
    }
}

#[async_trait]
impl Strategy for ArchiveStrategy {
    fn name(&self) -> &'static str {
        "archive"
    }

    async fn fetch(
        &self,
        params: &RequestParams,
        ctx: &FetchContext<'_>,
    ) -> Result<Vec<PriceRecord>, PipelineError> {
        let Some(state_code) = resolved(ctx, codes::resolve_state(&params.state), None) else {
            return Ok(Vec::new());
        };
        let Some(commodity_code) =
            resolved(ctx, codes::resolve_commodity(&params.commodity), None)
        else {
            return Ok(Vec::new());
        };
        let Some(market_code) = resolved(
            ctx,
            codes::resolve_market(state_code, &params.market),
            Some(state_code),
        ) else {
            return Ok(Vec::new());
        };

        let from = ctx
            .today
            .checked_sub_days(Days::new(self.lookback_days))
            .ok_or_else(|| PipelineError::InvalidInput(format!("no date range ending {}", ctx.today)))?;
        let query = ArchiveQuery::new(state_code, commodity_code, market_code, from, ctx.today);
        Ok(self.client.archive_report(&query).await?)
    }
}

/// Full synthesized history; empty only when configured for zero days.
pub struct SynthesizedStrategy {
    days: u32,
}

impl SynthesizedStrategy {
    pub fn new(days: u32) -> Self {
        Self { days }
    }
}

#[async_trait]
impl Strategy for SynthesizedStrategy {
    fn name(&self) -> &'static str {
        "synthesized"
    }

    async fn fetch(
        &self,
        params: &RequestParams,
        ctx: &FetchContext<'_>,
    ) -> Result<Vec<PriceRecord>, PipelineError> {
        Ok(synth::synthesize(
            &params.commodity,
            &params.market,
            self.days,
            ctx.today,
        ))
    }
}

/// Final link of the chain: synthesized history, or the single sample
/// record when that comes back empty. Always non-empty.
pub struct LastResortStrategy {
    days: u32,
}

impl LastResortStrategy {
    pub fn new(days: u32) -> Self {
        Self { days }
    }
}

#[async_trait]
impl Strategy for LastResortStrategy {
    fn name(&self) -> &'static str {
        "last-resort"
    }

    async fn fetch(
        &self,
        params: &RequestParams,
        ctx: &FetchContext<'_>,
    ) -> Result<Vec<PriceRecord>, PipelineError> {
        let records = synth::synthesize(&params.commodity, &params.market, self.days, ctx.today);
        if records.is_empty() {
            return Ok(vec![synth::degraded(
                &params.commodity,
                &params.market,
                ctx.today,
            )]);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;

    fn ctx(sink: &MemorySink) -> FetchContext<'_> {
        FetchContext {
            today: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            sink,
        }
    }

    // Nothing listens here; any request would fail the test via a network error.
    fn offline_client() -> PortalClient {
        PortalClient::with_base_url("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn trends_skips_network_for_unknown_state() {
        let sink = MemorySink::new();
        let strategy = TrendsStrategy::new(offline_client());
        let params = RequestParams::new("Nowhere", "Tomato", "Pune");
        let records = strategy.fetch(&params, &ctx(&sink)).await.unwrap();
        assert!(records.is_empty());
        assert!(sink.events().iter().any(|e| matches!(
            e,
            PipelineEvent::CodeNotFound { kind: CodeKind::State, .. }
        )));
    }

    #[tokio::test]
    async fn archive_skips_network_for_unmapped_market() {
        let sink = MemorySink::new();
        let strategy = ArchiveStrategy::new(offline_client());
        let params = RequestParams::new("Gujarat", "Onion", "Ahmedabad");
        let records = strategy.fetch(&params, &ctx(&sink)).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(
            sink.events(),
            vec![PipelineEvent::CodeNotFound {
                kind: CodeKind::Market,
                name: "Ahmedabad".into(),
                suggestion: None,
            }]
        );
    }

    #[tokio::test]
    async fn code_miss_carries_suggestion() {
        let sink = MemorySink::new();
        let strategy = ArchiveStrategy::new(offline_client());
        let params = RequestParams::new("Maharashtra", "Tomatoe", "Pune");
        strategy.fetch(&params, &ctx(&sink)).await.unwrap();
        assert_eq!(
            sink.events(),
            vec![PipelineEvent::CodeNotFound {
                kind: CodeKind::Commodity,
                name: "Tomatoe".into(),
                suggestion: Some("tomato"),
            }]
        );
    }

    #[tokio::test]
    async fn synthesized_respects_day_count() {
        let sink = MemorySink::new();
        let params = RequestParams::new("Maharashtra", "Tomato", "Pune");
        let records = SynthesizedStrategy::new(3)
            .fetch(&params, &ctx(&sink))
            .await
            .unwrap();
        assert_eq!(records.len(), 3);
        let none = SynthesizedStrategy::new(0)
            .fetch(&params, &ctx(&sink))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn last_resort_is_never_empty() {
        let sink = MemorySink::new();
        let params = RequestParams::new("Nowhere", "Unobtainium", "Nowhere");
        let records = LastResortStrategy::new(0)
            .fetch(&params, &ctx(&sink))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].note.as_deref(), Some(synth::SAMPLE_NOTE));
        assert_eq!(records[0].date, "18-Oct-2026");
    }

    #[test]
    fn strategy_names() {
        assert_eq!(TrendsStrategy::new(offline_client()).name(), "trends");
        assert_eq!(ArchiveStrategy::new(offline_client()).name(), "archive");
        assert_eq!(SynthesizedStrategy::new(7).name(), "synthesized");
        assert_eq!(LastResortStrategy::new(7).name(), "last-resort");
    }
}
