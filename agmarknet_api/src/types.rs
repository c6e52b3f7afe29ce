//! Record types returned by the portal client.

use serde::{Deserialize, Serialize};

/// One reported price quotation.
///
/// Field names on the wire follow the portal's column headings. `date` is
/// passed through in whatever format the producing strategy uses
/// (`M/YYYY` for monthly trends, `DD-Mon-YYYY` for daily reports), and the
/// price columns are the raw cell text. Only synthesized records carry a
/// `note`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    #[serde(rename = "S.No")]
    pub sequence_number: String,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Market")]
    pub market: String,

    #[serde(rename = "Commodity")]
    pub commodity: String,

    #[serde(rename = "Variety")]
    pub variety: String,

    #[serde(rename = "Min Price")]
    pub min_price: String,

    #[serde(rename = "Max Price")]
    pub max_price: String,

    #[serde(rename = "Modal Price")]
    pub modal_price: String,

    #[serde(rename = "Note", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PriceRecord {
    /// Whether this record was fabricated by a fallback rather than scraped.
    pub fn is_synthesized(&self) -> bool {
        self.note.is_some()
    }
}
