//! Results-table extraction for the portal's report pages.
//!
//! The report markup is not stable: table ids have changed between site
//! revisions and some pages wrap the grid in layout tables. The table is
//! therefore probed in a fixed order and cells are read by position.

use scraper::{ElementRef, Html, Selector};

use crate::types::PriceRecord;

/// Probed in order before falling back to the second table on the page.
const TABLE_PROBES: &[&str] = &[
    "table#cphBody_gridRecords",
    "table#gvReportData",
    "table.tableagmark_new",
];

/// Column layout of a results grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLayout {
    /// Monthly price-trends grid: market, variety, min, max, modal, ...
    ///
    /// The grid has no date or commodity column, so both are supplied by the
    /// caller and stamped onto every record.
    Trends { period: String, commodity: String },
    /// Daily archive grid: date, market, commodity, variety, min, max, modal.
    Archive,
}

impl TableLayout {
    /// Rows with fewer cells than this are dropped.
    pub fn min_cells(&self) -> usize {
        match self {
            Self::Trends { .. } => 6,
            Self::Archive => 7,
        }
    }

    fn market_cell(&self) -> usize {
        match self {
            Self::Trends { .. } => 0,
            Self::Archive => 1,
        }
    }

    fn to_record(&self, cells: &[String], sequence: usize) -> PriceRecord {
        match self {
            Self::Trends { period, commodity } => PriceRecord {
                sequence_number: sequence.to_string(),
                date: period.clone(),
                market: cells[0].clone(),
                commodity: commodity.clone(),
                variety: cells[1].clone(),
                min_price: cells[2].clone(),
                max_price: cells[3].clone(),
                modal_price: cells[4].clone(),
                note: None,
            },
            Self::Archive => PriceRecord {
                sequence_number: sequence.to_string(),
                date: cells[0].clone(),
                market: cells[1].clone(),
                commodity: cells[2].clone(),
                variety: cells[3].clone(),
                min_price: cells[4].clone(),
                max_price: cells[5].clone(),
                modal_price: cells[6].clone(),
                note: None,
            },
        }
    }
}

/// Converts the results grid in `html` into price records.
///
/// An empty vector means "no data": no candidate table, a header-only table,
/// or no row survived the cell-count and market filters. Sequence numbers
/// count emitted rows only, starting at 1.
pub fn extract(html: &str, layout: &TableLayout, market_filter: Option<&str>) -> Vec<PriceRecord> {
    let document = Html::parse_document(html);
    let Some(table) = locate_table(&document) else {
        tracing::warn!("No price data table found in response");
        return Vec::new();
    };

    let Ok(row_sel) = Selector::parse("tr") else {
        return Vec::new();
    };
    let rows: Vec<ElementRef<'_>> = table.select(&row_sel).collect();
    if rows.len() <= 1 {
        tracing::warn!("Price data table has no rows beyond the header");
        return Vec::new();
    }

    let needle = market_filter.map(str::to_lowercase);
    let mut records = Vec::new();
    for row in &rows[1..] {
        let cells = row_cells(*row);
        if cells.len() < layout.min_cells() {
            continue;
        }
        if let Some(needle) = needle.as_deref() {
            if !cells[layout.market_cell()].to_lowercase().contains(needle) {
                continue;
            }
        }
        records.push(layout.to_record(&cells, records.len() + 1));
    }

    tracing::debug!(rows = rows.len() - 1, kept = records.len(), "Extracted price table");
    records
}

fn locate_table(document: &Html) -> Option<ElementRef<'_>> {
    for probe in TABLE_PROBES {
        let Ok(selector) = Selector::parse(probe) else {
            continue;
        };
        if let Some(table) = document.select(&selector).next() {
            return Some(table);
        }
    }
    // First table is the site chrome.
    let selector = Selector::parse("table").ok()?;
    document.select(&selector).nth(1)
}

// Direct `td` children only; cells of a table nested inside a cell would
// otherwise shift every column after it.
fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}
