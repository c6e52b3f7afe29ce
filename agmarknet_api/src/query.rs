//! Form payload builders for the two report endpoints.
//!
//! Each endpoint names its controls differently; a query knows its own path
//! and field names so the session layer can stay generic over the payload.

use chrono::{Datelike, NaiveDate};

/// Monthly price-trends report.
pub const TRENDS_PATH: &str = "/PriceTrends/SA_Month_PriMV.aspx";
/// Daily state-wise archive report.
pub const ARCHIVE_PATH: &str = "/PriceAndArrivals/CommodityDailyStateWise_Archive.aspx";

/// Date format the archive form expects, e.g. `18-Oct-2026`.
pub const PORTAL_DATE_FORMAT: &str = "%d-%b-%Y";

/// Trait implemented by the endpoint payload builders.
pub trait FormQuery {
    /// Path of the form page, relative to the portal base URL.
    fn path(&self) -> &'static str;

    /// Endpoint-specific form fields, excluding the state tokens.
    fn form_fields(&self) -> Vec<(String, String)>;
}

/// Payload for the monthly trends page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsQuery {
    pub year: i32,
    pub month: u32,
    pub state_code: String,
    pub commodity_code: String,
}

impl TrendsQuery {
    /// Builds a query for the month containing `today`.
    pub fn for_month_of(today: NaiveDate, state_code: &str, commodity_code: &str) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            state_code: state_code.to_string(),
            commodity_code: commodity_code.to_string(),
        }
    }

    /// The `M/YYYY` label stamped onto records from this report.
    pub fn period_label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }
}

impl FormQuery for TrendsQuery {
    fn path(&self) -> &'static str {
        TRENDS_PATH
    }

    fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("ctl00$cphBody$cboYear".to_string(), self.year.to_string()),
            ("ctl00$cphBody$cboMonth".to_string(), self.month.to_string()),
            ("ctl00$cphBody$cboState".to_string(), self.state_code.clone()),
            (
                "ctl00$cphBody$cboCommodity".to_string(),
                self.commodity_code.clone(),
            ),
            ("ctl00$cphBody$btnSubmit".to_string(), "Submit".to_string()),
        ]
    }
}

/// Payload for the daily archive page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveQuery {
    pub state_code: String,
    pub commodity_code: String,
    pub market_code: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ArchiveQuery {
    /// Report for one market over the inclusive range `from..=to`.
    pub fn new(
        state_code: &str,
        commodity_code: &str,
        market_code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Self {
        Self {
            state_code: state_code.to_string(),
            commodity_code: commodity_code.to_string(),
            market_code: market_code.to_string(),
            from,
            to,
        }
    }
}

impl FormQuery for ArchiveQuery {
    fn path(&self) -> &'static str {
        ARCHIVE_PATH
    }

    fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("cphBody_cboState".to_string(), self.state_code.clone()),
            ("cphBody_cboCommodity".to_string(), self.commodity_code.clone()),
            ("cphBody_cboMarket".to_string(), self.market_code.clone()),
            (
                "cphBody_txtDate".to_string(),
                self.from.format(PORTAL_DATE_FORMAT).to_string(),
            ),
            (
                "cphBody_txtDateTo".to_string(),
                self.to.format(PORTAL_DATE_FORMAT).to_string(),
            ),
            ("cphBody_btnSubmit".to_string(), "Submit".to_string()),
        ]
    }
}
