//! HTTP client for the AgMarknet report forms.

use std::time::Duration;

use url::Url;

use crate::{
    query::{ArchiveQuery, FormQuery, TrendsQuery},
    session::FormSession,
    table::{self, TableLayout},
    types::PriceRecord,
    Error,
};

/// Production portal.
pub const DEFAULT_BASE_URL: &str = "https://agmarknet.gov.in";
/// Upper bound for each individual GET or POST.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the portal's report forms.
///
/// Holds no connection state of its own: every report opens a new
/// [`FormSession`] that lives only for that report's GET and POST.
#[derive(Debug, Clone)]
pub struct PortalClient {
    base_url: String,
    timeout: Duration,
}

impl Default for PortalClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalClient {
    /// Creates a client pointing at the production portal.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })
    }

    /// Runs the GET-then-POST round trip for `query` and returns the result page.
    pub async fn submit_form<Q: FormQuery>(&self, query: &Q) -> Result<String, Error> {
        let url = self.get_url(query.path())?;
        let session = FormSession::open(self.timeout)?;
        let tokens = session.fetch_tokens(&url).await?;
        session.submit(&url, &tokens, &query.form_fields()).await
    }

    /// Fetches the monthly trends grid, keeping only rows whose market name
    /// contains `market_filter`. Records echo `commodity` as given.
    pub async fn price_trends(
        &self,
        query: &TrendsQuery,
        commodity: &str,
        market_filter: &str,
    ) -> Result<Vec<PriceRecord>, Error> {
        let html = self.submit_form(query).await?;
        let layout = TableLayout::Trends {
            period: query.period_label(),
            commodity: commodity.to_string(),
        };
        let records = table::extract(&html, &layout, Some(market_filter));
        tracing::info!("Found {} price records from price trends page", records.len());
        Ok(records)
    }

    /// Fetches the daily archive grid for a fully resolved state, commodity and market.
    pub async fn archive_report(&self, query: &ArchiveQuery) -> Result<Vec<PriceRecord>, Error> {
        let html = self.submit_form(query).await?;
        let records = table::extract(&html, &TableLayout::Archive, None);
        tracing::info!("Found {} price records from archive report", records.len());
        Ok(records)
    }
}
