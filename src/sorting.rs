// ↕️ Sort Comparator Registry - named sort strategies
// A strategy is looked up by its human-readable label ("Highest IRR").
// Every strategy is a total order: equal keys fall back to id ascending,
// and sorting is stable on top of that.

use crate::entities::{Listable, NumericField, TextField};
use crate::parser;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// DIRECTION & CRITERION
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smallest / oldest first
    #[default]
    Asc,
    /// Largest / newest first
    Desc,
}

impl Direction {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// What a strategy compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "field", rename_all = "snake_case")]
pub enum SortCriterion {
    /// Parsed listing date. Records without a date sort as oldest and
    /// order among themselves by id in the strategy's direction.
    Date,
    Numeric(NumericField),
    /// Case-insensitive alphabetical
    Text(TextField),
    Id,
}

// ============================================================================
// SORT STRATEGY
// ============================================================================

/// A labelled comparator, e.g. "Amount (High to Low)"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStrategy {
    pub label: String,
    pub criterion: SortCriterion,
    #[serde(default)]
    pub direction: Direction,
}

/// Precomputed primary key of one record
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Date(Option<i64>),
    Number(f64),
    Text(String),
    Id,
}

impl SortStrategy {
    pub fn new(label: impl Into<String>, criterion: SortCriterion, direction: Direction) -> Self {
        SortStrategy {
            label: label.into(),
            criterion,
            direction,
        }
    }

    fn sort_value<R: Listable + ?Sized>(&self, record: &R) -> SortValue {
        match self.criterion {
            SortCriterion::Date => SortValue::Date(record.date_field().map(parser::parse_date)),
            SortCriterion::Numeric(field) => {
                let value = record
                    .numeric_field(field)
                    .map(|raw| field.kind().parse(raw))
                    .unwrap_or(0.0);
                // -0.0 and 0.0 must compare equal under total_cmp
                SortValue::Number(value + 0.0)
            }
            SortCriterion::Text(field) => {
                SortValue::Text(record.text_field(field).unwrap_or_default().to_lowercase())
            }
            SortCriterion::Id => SortValue::Id,
        }
    }

    fn compare_keyed<R: Listable + ?Sized>(
        &self,
        key_a: &SortValue,
        a: &R,
        key_b: &SortValue,
        b: &R,
    ) -> Ordering {
        let primary = match (key_a, key_b) {
            (SortValue::Date(None), SortValue::Date(None)) => {
                return self.direction.apply(a.id().cmp(b.id()));
            }
            (SortValue::Date(x), SortValue::Date(y)) => x.cmp(y),
            (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(y),
            (SortValue::Text(x), SortValue::Text(y)) => x.cmp(y),
            (SortValue::Id, SortValue::Id) => a.id().cmp(b.id()),
            // Both keys always come from the same criterion
            _ => Ordering::Equal,
        };

        self.direction
            .apply(primary)
            .then_with(|| a.id().cmp(b.id()))
    }

    /// Compare two records under this strategy
    pub fn compare<R: Listable + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        self.compare_keyed(&self.sort_value(a), a, &self.sort_value(b), b)
    }

    /// Stable sort; each display string is parsed once per record
    pub fn sort<R: Listable + ?Sized>(&self, records: &mut Vec<&R>) {
        let mut keyed: Vec<(SortValue, &R)> = records
            .iter()
            .map(|record| (self.sort_value(*record), *record))
            .collect();

        keyed.sort_by(|(key_a, a), (key_b, b)| self.compare_keyed(key_a, *a, key_b, *b));

        records.clear();
        records.extend(keyed.into_iter().map(|(_, record)| record));
    }
}

// ============================================================================
// SORT REGISTRY
// ============================================================================

/// Borrowed lookup table of a dataset's sort strategies
#[derive(Debug, Clone, Copy)]
pub struct SortRegistry<'a> {
    strategies: &'a [SortStrategy],
}

impl<'a> SortRegistry<'a> {
    pub fn new(strategies: &'a [SortStrategy]) -> Self {
        SortRegistry { strategies }
    }

    pub fn get(&self, sort_key: &str) -> Option<&'a SortStrategy> {
        self.strategies.iter().find(|s| s.label == sort_key)
    }

    pub fn contains(&self, sort_key: &str) -> bool {
        self.get(sort_key).is_some()
    }

    pub fn labels(&self) -> Vec<&'a str> {
        self.strategies.iter().map(|s| s.label.as_str()).collect()
    }

    /// Unknown keys compare everything as equal
    pub fn compare<R: Listable + ?Sized>(&self, a: &R, b: &R, sort_key: &str) -> Ordering {
        match self.get(sort_key) {
            Some(strategy) => strategy.compare(a, b),
            None => Ordering::Equal,
        }
    }

    /// Sort in place; an unknown key leaves the input order untouched.
    ///
    /// Returns whether a strategy was applied.
    pub fn sort<R: Listable + ?Sized>(&self, records: &mut Vec<&R>, sort_key: &str) -> bool {
        match self.get(sort_key) {
            Some(strategy) => {
                strategy.sort(records);
                true
            }
            None => {
                tracing::debug!(sort_key = %sort_key, "unknown sort key, keeping input order");
                false
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FundRecord, PropertyRecord, TransactionRecord};

    fn strategies() -> Vec<SortStrategy> {
        vec![
            SortStrategy::new("Newest", SortCriterion::Date, Direction::Desc),
            SortStrategy::new("Oldest", SortCriterion::Date, Direction::Asc),
            SortStrategy::new("Highest IRR", SortCriterion::Numeric(NumericField::Rate), Direction::Desc),
            SortStrategy::new("Lowest IRR", SortCriterion::Numeric(NumericField::Rate), Direction::Asc),
            SortStrategy::new("Amount (High to Low)", SortCriterion::Numeric(NumericField::Amount), Direction::Desc),
            SortStrategy::new("Amount (Low to High)", SortCriterion::Numeric(NumericField::Amount), Direction::Asc),
            SortStrategy::new("Name (A-Z)", SortCriterion::Text(TextField::Name), Direction::Asc),
        ]
    }

    fn ids<R: Listable>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_highest_irr_ties_break_by_id() {
        let funds = vec![
            FundRecord::new("F-3", "c", "Income", "$1", "14%"),
            FundRecord::new("F-1", "a", "Income", "$1", "9%"),
            FundRecord::new("F-2", "b", "Income", "$1", "14%"),
            FundRecord::new("F-4", "d", "Income", "$1", "12-15%"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        let mut view: Vec<&FundRecord> = funds.iter().collect();
        assert!(registry.sort(&mut view, "Highest IRR"));
        assert_eq!(ids(&view), vec!["F-2", "F-3", "F-4", "F-1"]);

        assert!(registry.sort(&mut view, "Lowest IRR"));
        assert_eq!(ids(&view), vec!["F-1", "F-4", "F-2", "F-3"]);
    }

    #[test]
    fn test_amount_sort_parses_currency() {
        let txs = vec![
            TransactionRecord::new("T-1", "a", "Deposit", "$1,250", "Jan 1, 2024, 09:00 AM"),
            TransactionRecord::new("T-2", "b", "Withdrawal", "-$5,000", "Jan 2, 2024, 09:00 AM"),
            TransactionRecord::new("T-3", "c", "Deposit", "$12,000.50", "Jan 3, 2024, 09:00 AM"),
            TransactionRecord::new("T-4", "d", "Deposit", "pending", "Jan 4, 2024, 09:00 AM"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        let mut view: Vec<&TransactionRecord> = txs.iter().collect();
        registry.sort(&mut view, "Amount (High to Low)");
        assert_eq!(ids(&view), vec!["T-3", "T-1", "T-4", "T-2"]);
    }

    #[test]
    fn test_date_sort_newest_and_oldest() {
        let txs = vec![
            TransactionRecord::new("T-1", "a", "Deposit", "$1", "Jan 15, 2024, 09:30 AM"),
            TransactionRecord::new("T-2", "b", "Deposit", "$1", "Jan 15,2024, 09:30 PM"),
            TransactionRecord::new("T-3", "c", "Deposit", "$1", "Dec 31, 2023, 11:59 PM"),
            TransactionRecord::new("T-4", "d", "Deposit", "$1", "garbage"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        let mut view: Vec<&TransactionRecord> = txs.iter().collect();
        registry.sort(&mut view, "Newest");
        assert_eq!(ids(&view), vec!["T-2", "T-1", "T-3", "T-4"]);

        registry.sort(&mut view, "Oldest");
        assert_eq!(ids(&view), vec!["T-4", "T-3", "T-1", "T-2"]);
    }

    #[test]
    fn test_date_sort_without_dates_falls_back_to_id() {
        let properties = vec![
            PropertyRecord::new("P-2", "b", "x", "Auction", "$1"),
            PropertyRecord::new("P-10", "c", "x", "Auction", "$1"),
            PropertyRecord::new("P-1", "a", "x", "Auction", "$1"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        let mut view: Vec<&PropertyRecord> = properties.iter().collect();
        registry.sort(&mut view, "Newest");
        assert_eq!(ids(&view), vec!["P-2", "P-10", "P-1"]);

        registry.sort(&mut view, "Oldest");
        assert_eq!(ids(&view), vec!["P-1", "P-10", "P-2"]);
    }

    #[test]
    fn test_dated_records_sort_after_undated_when_oldest() {
        let properties = vec![
            PropertyRecord::new("P-1", "a", "x", "Auction", "$1").with_auction_date("Mar 3, 2024, 10:00 AM"),
            PropertyRecord::new("P-2", "b", "x", "Auction", "$1"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        let mut view: Vec<&PropertyRecord> = properties.iter().collect();
        registry.sort(&mut view, "Oldest");
        assert_eq!(ids(&view), vec!["P-2", "P-1"]);

        registry.sort(&mut view, "Newest");
        assert_eq!(ids(&view), vec!["P-1", "P-2"]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let funds = vec![
            FundRecord::new("F-1", "beta", "Income", "$1", "1%"),
            FundRecord::new("F-2", "Alpha", "Income", "$1", "1%"),
            FundRecord::new("F-3", "alpha", "Income", "$1", "1%"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        let mut view: Vec<&FundRecord> = funds.iter().collect();
        registry.sort(&mut view, "Name (A-Z)");
        assert_eq!(ids(&view), vec!["F-2", "F-3", "F-1"]);
    }

    #[test]
    fn test_unknown_sort_key_is_noop() {
        let funds = vec![
            FundRecord::new("F-9", "a", "Income", "$1", "1%"),
            FundRecord::new("F-1", "b", "Income", "$1", "20%"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        let mut view: Vec<&FundRecord> = funds.iter().collect();
        assert!(!registry.sort(&mut view, "Most Popular"));
        assert_eq!(ids(&view), vec!["F-9", "F-1"]);
        assert_eq!(registry.compare(&funds[0], &funds[1], "Most Popular"), Ordering::Equal);
    }

    #[test]
    fn test_compare_matches_sort() {
        let funds = vec![
            FundRecord::new("F-1", "a", "Income", "$1", "10%"),
            FundRecord::new("F-2", "b", "Income", "$1", "10%"),
        ];
        let strategies = strategies();
        let registry = SortRegistry::new(&strategies);

        assert_eq!(registry.compare(&funds[0], &funds[1], "Highest IRR"), Ordering::Less);
        assert_eq!(registry.compare(&funds[1], &funds[0], "Highest IRR"), Ordering::Greater);
        assert_eq!(registry.compare(&funds[0], &funds[0], "Highest IRR"), Ordering::Equal);
    }

    #[test]
    fn test_criterion_serde_shape() {
        let strategy: SortStrategy = serde_json::from_str(
            r#"{"label": "Most Committed", "criterion": {"by": "numeric", "field": "capacity_used"}, "direction": "desc"}"#,
        )
        .unwrap();
        assert_eq!(strategy.criterion, SortCriterion::Numeric(NumericField::CapacityUsed));
        assert_eq!(strategy.direction, Direction::Desc);

        let date: SortCriterion = serde_json::from_str(r#"{"by": "date"}"#).unwrap();
        assert_eq!(date, SortCriterion::Date);
    }
}
