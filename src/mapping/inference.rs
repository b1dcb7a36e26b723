use crate::types::TradeField;

/// Pairs a source column of the uploaded file with the trade field it feeds.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ColumnMapping {
    pub source_column: String,
    pub target: TradeField
}

impl ColumnMapping {
    pub fn new(source_column: impl Into<String>, target: TradeField) -> Self {
        Self {
            source_column: source_column.into(),
            target
        }
    }
}

enum HeaderTest {
    ContainsAny(&'static [&'static str]),
    ContainsAll(&'static [&'static str]),
    EqualsAny(&'static [&'static str])
}

impl HeaderTest {
    fn matches(&self, header: &str) -> bool {
        match self {
            HeaderTest::ContainsAny(needles) => needles.iter().any(|needle| header.contains(needle)),
            HeaderTest::ContainsAll(needles) => needles.iter().all(|needle| header.contains(needle)),
            HeaderTest::EqualsAny(names) => names.contains(&header)
        }
    }
}

struct MappingRule {
    test: HeaderTest,
    target: TradeField
}

//NOTE: Evaluated top to bottom and the first hit wins, so the order is part of the behaviour.
//      Time rules precede price rules, and every "contains" rule precedes the bare date/time names.
const MAPPING_RULES: [MappingRule; 13] = [
    MappingRule { test: HeaderTest::ContainsAny(&["pair", "symbol", "instrument"]), target: TradeField::Symbol },
    MappingRule { test: HeaderTest::ContainsAny(&["direction", "side", "type"]), target: TradeField::Direction },
    MappingRule { test: HeaderTest::ContainsAll(&["entry", "time"]), target: TradeField::EntryTime },
    MappingRule { test: HeaderTest::ContainsAll(&["exit", "time"]), target: TradeField::ExitTime },
    MappingRule { test: HeaderTest::ContainsAll(&["entry", "price"]), target: TradeField::EntryPrice },
    MappingRule { test: HeaderTest::ContainsAll(&["exit", "price"]), target: TradeField::ExitPrice },
    MappingRule { test: HeaderTest::ContainsAny(&["lot", "size", "volume"]), target: TradeField::TotalLots },
    MappingRule { test: HeaderTest::ContainsAny(&["sl", "stop"]), target: TradeField::SlInitial },
    MappingRule { test: HeaderTest::ContainsAny(&["tp", "take profit", "target"]), target: TradeField::TpInitial },
    MappingRule { test: HeaderTest::ContainsAny(&["pnl", "profit", "p&l", "result"]), target: TradeField::NetPnl },
    MappingRule { test: HeaderTest::ContainsAny(&["r/r", "rr", "r:r", "r-multiple"]), target: TradeField::RMultipleActual },
    MappingRule { test: HeaderTest::ContainsAny(&["session"]), target: TradeField::Session },
    MappingRule { test: HeaderTest::EqualsAny(&["date", "time", "datetime"]), target: TradeField::EntryTime }
];

/// Guesses the trade field for a single header, falling back to `Skip`.
///
/// Matching is substring based on the lower-cased header, so it is deliberately
/// loose: `"Currency"` contains `"rr"` and lands on `r_multiple_actual`.
pub fn infer_field(header: &str) -> TradeField {
    let header = header.to_lowercase();

    MAPPING_RULES.iter()
        .find(|rule| rule.test.matches(&header))
        .map(|rule| rule.target)
        .unwrap_or(TradeField::Skip)
}

/// Produces the default mapping, one entry per header in header order.
pub fn infer_mapping(headers: &[String]) -> Vec<ColumnMapping> {
    headers.iter()
        .map(|header| ColumnMapping::new(header.as_str(), infer_field(header)))
        .collect()
}
