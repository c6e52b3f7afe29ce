use agmarknet_lib::PriceRecord;
use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to the table view.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct PriceRow {
    #[tabled(rename = "S.No")]
    #[serde(rename = "S.No")]
    sequence_number: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Market")]
    #[serde(rename = "Market")]
    market: String,
    #[tabled(rename = "Commodity")]
    #[serde(rename = "Commodity")]
    commodity: String,
    #[tabled(rename = "Variety")]
    #[serde(rename = "Variety")]
    variety: String,
    #[tabled(rename = "Min Price")]
    #[serde(rename = "Min Price")]
    min_price: String,
    #[tabled(rename = "Max Price")]
    #[serde(rename = "Max Price")]
    max_price: String,
    #[tabled(rename = "Modal Price")]
    #[serde(rename = "Modal Price")]
    modal_price: String,
    #[tabled(rename = "Note")]
    #[serde(rename = "Note")]
    note: String,
}

#[derive(Tabled, Serialize)]
struct CodeRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
}

/// Body printed instead of records when a lookup cannot be served.
#[derive(Serialize, Debug)]
pub struct ErrorPayload {
    pub error: String,
    pub usage: &'static str,
    pub example: &'static str,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            usage: "agmarknet prices --state STATE --commodity COMMODITY --market MARKET",
            example: "agmarknet prices --state Maharashtra --commodity Tomato --market Pune",
        }
    }
}

// -- Row builders --

fn build_price_rows(records: &[PriceRecord]) -> Vec<PriceRow> {
    records
        .iter()
        .map(|r| PriceRow {
            sequence_number: r.sequence_number.clone(),
            date: r.date.clone(),
            market: r.market.clone(),
            commodity: r.commodity.clone(),
            variety: r.variety.clone(),
            min_price: r.min_price.clone(),
            max_price: r.max_price.clone(),
            modal_price: r.modal_price.clone(),
            note: r.note.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_code_rows(entries: &[(&str, &str)]) -> Vec<CodeRow> {
    entries
        .iter()
        .map(|(name, code)| CodeRow {
            name: title_case(name),
            code: code.to_string(),
        })
        .collect()
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| match word {
            "and" => word.to_string(),
            _ => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// -- Price output --

pub fn print_prices(records: &[PriceRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(build_price_rows(records))),
        OutputFormat::Markdown => {
            let mut table = Table::new(build_price_rows(records));
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => print!("{}", rows_to_csv(build_price_rows(records))?),
    }
    Ok(())
}

// -- Code listing output --

pub fn print_codes(entries: &[(&str, &str)], format: &OutputFormat) -> Result<()> {
    let rows = build_code_rows(entries);
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Csv => print!("{}", rows_to_csv(rows)?),
    }
    Ok(())
}

// -- Errors --

/// Prints the error payload as JSON on stdout, whatever the chosen format.
pub fn print_error_payload(payload: &ErrorPayload) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

fn rows_to_csv<T: Serialize>(rows: Vec<T>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: &str, note: Option<&str>) -> PriceRecord {
        PriceRecord {
            sequence_number: seq.into(),
            date: "18-Oct-2026".into(),
            market: "Pune".into(),
            commodity: "Tomato".into(),
            variety: "General".into(),
            min_price: "1500".into(),
            max_price: "2500".into(),
            modal_price: "2000".into(),
            note: note.map(str::to_string),
        }
    }

    // -- format parsing --

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("CSV"), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("xml"), OutputFormat::Table);
    }

    // -- Row builder tests --

    #[test]
    fn test_build_price_rows_mapping() {
        let rows = build_price_rows(&[record("1", None), record("2", Some("Sample"))]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sequence_number, "1");
        assert_eq!(rows[0].market, "Pune");
        assert_eq!(rows[0].note, "");
        assert_eq!(rows[1].note, "Sample");
    }

    #[test]
    fn test_build_price_rows_empty() {
        assert!(build_price_rows(&[]).is_empty());
    }

    #[test]
    fn test_build_code_rows_title_case() {
        let rows = build_code_rows(&[("andaman and nicobar islands", "30"), ("tomato", "78")]);
        assert_eq!(rows[0].name, "Andaman and Nicobar Islands");
        assert_eq!(rows[0].code, "30");
        assert_eq!(rows[1].name, "Tomato");
    }

    // -- CSV output --

    #[test]
    fn test_price_csv_has_header_and_rows() {
        let csv = rows_to_csv(build_price_rows(&[record("1", None)])).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("S.No,Date,Market,Commodity,Variety,Min Price,Max Price,Modal Price,Note")
        );
        assert_eq!(
            lines.next(),
            Some("1,18-Oct-2026,Pune,Tomato,General,1500,2500,2000,")
        );
        assert_eq!(lines.next(), None);
    }

    // -- Table output --

    #[test]
    fn test_table_contains_headers() {
        let rendered = Table::new(build_price_rows(&[record("1", None)])).to_string();
        assert!(rendered.contains("Modal Price"));
        assert!(rendered.contains("Tomato"));
    }

    #[test]
    fn test_markdown_style() {
        let mut table = Table::new(build_price_rows(&[record("1", None)]));
        table.with(Style::markdown());
        let rendered = table.to_string();
        assert!(rendered.starts_with("| S.No"));
    }

    // -- Error payload --

    #[test]
    fn test_error_payload_shape() {
        let payload = ErrorPayload::new("Missing query parameters");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["error"], "Missing query parameters");
        assert!(value["usage"].as_str().unwrap().contains("--commodity"));
        assert!(value["example"].as_str().unwrap().contains("Maharashtra"));
    }
}
