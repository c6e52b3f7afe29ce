//! Static name-to-code tables for the portal's drop-down controls.
//!
//! Lookups are exact after lowercasing. The market table only covers a
//! couple of states; a miss is an ordinary outcome that callers are expected
//! to route around.

use crate::error::{CodeKind, PipelineError};

/// State and union territory codes as used by the report forms.
pub const STATE_CODES: &[(&str, &str)] = &[
    ("andhra pradesh", "01"),
    ("arunachal pradesh", "02"),
    ("assam", "03"),
    ("bihar", "04"),
    ("chhattisgarh", "05"),
    ("goa", "06"),
    ("gujarat", "07"),
    ("haryana", "08"),
    ("himachal pradesh", "09"),
    ("jammu and kashmir", "10"),
    ("jharkhand", "11"),
    ("karnataka", "12"),
    ("kerala", "13"),
    ("madhya pradesh", "14"),
    ("maharashtra", "15"),
    ("manipur", "16"),
    ("meghalaya", "17"),
    ("mizoram", "18"),
    ("nagaland", "19"),
    ("odisha", "20"),
    ("punjab", "21"),
    ("rajasthan", "22"),
    ("sikkim", "23"),
    ("tamil nadu", "24"),
    ("telangana", "25"),
    ("tripura", "26"),
    ("uttar pradesh", "27"),
    ("uttarakhand", "28"),
    ("west bengal", "29"),
    ("andaman and nicobar islands", "30"),
    ("chandigarh", "31"),
    ("dadra and nagar haveli", "32"),
    ("daman and diu", "33"),
    ("delhi", "34"),
    ("lakshadweep", "35"),
    ("puducherry", "36"),
];

pub const COMMODITY_CODES: &[(&str, &str)] = &[
    ("rice", "1"),
    ("wheat", "2"),
    ("maize", "3"),
    ("apple", "4"),
    ("banana", "5"),
    ("orange", "6"),
    ("mango", "7"),
    ("grapes", "8"),
    ("watermelon", "9"),
    ("coconut", "10"),
    ("sugarcane", "11"),
    ("cotton", "12"),
    ("jute", "13"),
    ("coffee", "14"),
    ("tea", "15"),
    ("milk", "16"),
    ("egg", "17"),
    ("fish", "18"),
    ("chicken", "19"),
    ("mutton", "20"),
    ("beef", "21"),
    ("pork", "22"),
    ("onion", "23"),
    ("potato", "24"),
    ("tomato", "78"),
];

/// Market codes keyed by state code.
pub const MARKET_CODES: &[(&str, &[(&str, &str)])] = &[
    // Karnataka
    (
        "12",
        &[
            ("bangalore", "1"),
            ("mysore", "2"),
            ("hubli", "3"),
            ("belgaum", "4"),
            ("gulbarga", "5"),
            ("mangalore", "6"),
            ("shimoga", "7"),
            ("bellary", "8"),
            ("bijapur", "9"),
            ("davangere", "10"),
        ],
    ),
    // Maharashtra
    (
        "15",
        &[
            ("mumbai", "1"),
            ("pune", "2"),
            ("nagpur", "3"),
            ("nashik", "4"),
            ("aurangabad", "5"),
            ("solapur", "6"),
            ("kolhapur", "7"),
            ("amravati", "8"),
            ("latur", "9"),
            ("ahmednagar", "10"),
        ],
    ),
];

/// Below this similarity a miss gets no "did you mean".
const SUGGESTION_THRESHOLD: f64 = 0.85;

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    table
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, code)| *code)
}

/// Resolves a state or union territory name to its form code.
pub fn resolve_state(name: &str) -> Result<&'static str, PipelineError> {
    lookup(STATE_CODES, name).ok_or_else(|| PipelineError::NotFound {
        kind: CodeKind::State,
        name: name.to_string(),
    })
}

/// Resolves a commodity name to its form code.
pub fn resolve_commodity(name: &str) -> Result<&'static str, PipelineError> {
    lookup(COMMODITY_CODES, name).ok_or_else(|| PipelineError::NotFound {
        kind: CodeKind::Commodity,
        name: name.to_string(),
    })
}

/// Resolves a market name within a state (by state code) to its form code.
pub fn resolve_market(state_code: &str, name: &str) -> Result<&'static str, PipelineError> {
    markets_for(state_code)
        .and_then(|markets| lookup(markets, name))
        .ok_or_else(|| PipelineError::NotFound {
            kind: CodeKind::Market,
            name: name.to_string(),
        })
}

fn markets_for(state_code: &str) -> Option<&'static [(&'static str, &'static str)]> {
    MARKET_CODES
        .iter()
        .find(|(code, _)| *code == state_code)
        .map(|(_, markets)| *markets)
}

/// Closest known name for a lookup miss, if any is similar enough.
pub fn suggest(kind: CodeKind, name: &str, state_code: Option<&str>) -> Option<&'static str> {
    let table: &[(&'static str, &'static str)] = match kind {
        CodeKind::State => STATE_CODES,
        CodeKind::Commodity => COMMODITY_CODES,
        CodeKind::Market => markets_for(state_code?)?,
    };
    let key = name.trim().to_lowercase();
    table
        .iter()
        .map(|(entry, _)| (*entry, strsim::jaro_winkler(entry, &key)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entry, _)| entry)
}

/// All states as `(name, code)`, ordered by code.
pub fn list_states() -> Vec<(&'static str, &'static str)> {
    sorted_by_code(STATE_CODES)
}

/// All commodities as `(name, code)`, ordered by code.
pub fn list_commodities() -> Vec<(&'static str, &'static str)> {
    sorted_by_code(COMMODITY_CODES)
}

/// Markets known for a state code, ordered by code. Empty for unmapped states.
pub fn list_markets(state_code: &str) -> Vec<(&'static str, &'static str)> {
    markets_for(state_code).map(sorted_by_code).unwrap_or_default()
}

fn sorted_by_code(
    table: &[(&'static str, &'static str)],
) -> Vec<(&'static str, &'static str)> {
    let mut entries = table.to_vec();
    entries.sort_by_key(|(_, code)| code.parse::<u32>().unwrap_or(u32::MAX));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_lookup_ignores_case() {
        assert_eq!(resolve_state("Maharashtra").unwrap(), "15");
        assert_eq!(resolve_state("maharashtra").unwrap(), "15");
        assert_eq!(resolve_state("MAHARASHTRA").unwrap(), "15");
    }

    #[test]
    fn state_lookup_trims() {
        assert_eq!(resolve_state("  Tamil Nadu ").unwrap(), "24");
    }

    #[test]
    fn all_states_and_territories_present() {
        assert_eq!(STATE_CODES.len(), 36);
        assert_eq!(resolve_state("Puducherry").unwrap(), "36");
    }

    #[test]
    fn unknown_state_is_not_found() {
        match resolve_state("Nowhere") {
            Err(PipelineError::NotFound { kind, name }) => {
                assert_eq!(kind, CodeKind::State);
                assert_eq!(name, "Nowhere");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn commodity_lookup() {
        assert_eq!(resolve_commodity("Tomato").unwrap(), "78");
        assert_eq!(resolve_commodity("potato").unwrap(), "24");
        assert!(resolve_commodity("Unobtainium").is_err());
    }

    #[test]
    fn market_lookup_is_scoped_to_state() {
        assert_eq!(resolve_market("15", "Pune").unwrap(), "2");
        assert_eq!(resolve_market("12", "Mysore").unwrap(), "2");
        assert!(resolve_market("12", "Pune").is_err());
    }

    #[test]
    fn market_lookup_for_unmapped_state() {
        assert!(matches!(
            resolve_market("07", "Ahmedabad"),
            Err(PipelineError::NotFound {
                kind: CodeKind::Market,
                ..
            })
        ));
    }

    #[test]
    fn suggestion_for_typo() {
        assert_eq!(suggest(CodeKind::State, "Maharastra", None), Some("maharashtra"));
        assert_eq!(suggest(CodeKind::Commodity, "tomatoe", None), Some("tomato"));
        assert_eq!(suggest(CodeKind::Market, "pnue", Some("15")), Some("pune"));
    }

    #[test]
    fn no_suggestion_for_garbage() {
        assert_eq!(suggest(CodeKind::Commodity, "xyzzy", None), None);
        assert_eq!(suggest(CodeKind::Market, "pune", None), None);
    }

    #[test]
    fn listings_are_ordered_by_code() {
        let commodities = list_commodities();
        assert_eq!(commodities.first(), Some(&("rice", "1")));
        assert_eq!(commodities.last(), Some(&("tomato", "78")));
        assert_eq!(list_states()[0], ("andhra pradesh", "01"));
        assert_eq!(list_markets("15")[1], ("pune", "2"));
        assert_eq!(list_markets("15").last(), Some(&("ahmednagar", "10")));
        assert!(list_markets("34").is_empty());
    }
}
