// Entity Models - the three listable record variants
//
// Each record keeps its display strings exactly as they arrive from the data
// source. The pipeline only sees records through the `Listable` capability
// surface, so filter/search/sort/paginate never name a concrete variant.

pub mod fund;
pub mod property;
pub mod transaction;

pub use fund::FundRecord;
pub use property::PropertyRecord;
pub use transaction::TransactionRecord;

use crate::parser::ValueKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD KEYS
// ============================================================================

/// Free-text fields a dataset can search or sort alphabetically on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    /// Address, fund name or transaction description
    Name,
    /// County/state, fund strategy or counterparty
    Location,
    Description,
    Category,
    Id,
}

impl TextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Location => "location",
            TextField::Description => "description",
            TextField::Category => "category",
            TextField::Id => "id",
        }
    }
}

/// Display-formatted numeric fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// Opening bid, fund size, transaction amount
    Amount,
    /// Interest rate or target IRR
    Rate,
    /// Share of fund capacity already committed
    CapacityUsed,
}

impl NumericField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericField::Amount => "amount",
            NumericField::Rate => "rate",
            NumericField::CapacityUsed => "capacity_used",
        }
    }

    /// Parser that reads this field's display string
    pub fn kind(&self) -> ValueKind {
        match self {
            NumericField::Amount => ValueKind::Currency,
            NumericField::Rate | NumericField::CapacityUsed => ValueKind::Percentage,
        }
    }

    pub fn all() -> [NumericField; 3] {
        [NumericField::Amount, NumericField::Rate, NumericField::CapacityUsed]
    }
}

// ============================================================================
// CAPABILITY SURFACE
// ============================================================================

/// What the listing pipeline needs from a record
pub trait Listable {
    /// Unique within its dataset; tie-break and fallback sort key
    fn id(&self) -> &str;

    /// Tag/type/status label matched by filters
    fn category(&self) -> &str;

    /// `None` when the variant has no such field
    fn text_field(&self, field: TextField) -> Option<&str>;

    /// Raw display string, e.g. "$450,200" or "12-15%"
    fn numeric_field(&self, field: NumericField) -> Option<&str>;

    /// Raw listing date, e.g. "Jan 15, 2024, 09:30 AM"
    fn date_field(&self) -> Option<&str>;

    /// Values of the configured searchable fields, skipping absent ones
    fn searchable_fields(&self, fields: &[TextField]) -> Vec<&str> {
        fields
            .iter()
            .filter_map(|field| self.text_field(*field))
            .collect()
    }
}

// ============================================================================
// TAGGED RECORD
// ============================================================================

/// Any row of any listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListableRecord {
    Property(PropertyRecord),
    Fund(FundRecord),
    Transaction(TransactionRecord),
}

impl ListableRecord {
    fn inner(&self) -> &dyn Listable {
        match self {
            ListableRecord::Property(p) => p,
            ListableRecord::Fund(f) => f,
            ListableRecord::Transaction(t) => t,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ListableRecord::Property(_) => "property",
            ListableRecord::Fund(_) => "fund",
            ListableRecord::Transaction(_) => "transaction",
        }
    }
}

impl Listable for ListableRecord {
    fn id(&self) -> &str {
        self.inner().id()
    }

    fn category(&self) -> &str {
        self.inner().category()
    }

    fn text_field(&self, field: TextField) -> Option<&str> {
        self.inner().text_field(field)
    }

    fn numeric_field(&self, field: NumericField) -> Option<&str> {
        self.inner().numeric_field(field)
    }

    fn date_field(&self) -> Option<&str> {
        self.inner().date_field()
    }
}

impl From<PropertyRecord> for ListableRecord {
    fn from(record: PropertyRecord) -> Self {
        ListableRecord::Property(record)
    }
}

impl From<FundRecord> for ListableRecord {
    fn from(record: FundRecord) -> Self {
        ListableRecord::Fund(record)
    }
}

impl From<TransactionRecord> for ListableRecord {
    fn from(record: TransactionRecord) -> Self {
        ListableRecord::Transaction(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_record_delegates() {
        let record: ListableRecord = FundRecord::new(
            "F-001",
            "Sunbelt Redemption Fund I",
            "Redemption",
            "$25,000,000",
            "12-15%",
        )
        .with_capacity_used("85%")
        .into();

        assert_eq!(record.id(), "F-001");
        assert_eq!(record.category(), "Redemption");
        assert_eq!(record.kind_name(), "fund");
        assert_eq!(record.numeric_field(NumericField::Rate), Some("12-15%"));
        assert_eq!(record.numeric_field(NumericField::CapacityUsed), Some("85%"));
        assert_eq!(record.date_field(), None);
    }

    #[test]
    fn test_searchable_fields_skip_missing() {
        let record: ListableRecord = TransactionRecord::new(
            "T-9",
            "Capital call",
            "Deposit",
            "$10,000",
            "Jan 15, 2024, 09:30 AM",
        )
        .into();

        let fields = record.searchable_fields(&[TextField::Name, TextField::Description, TextField::Id]);
        assert_eq!(fields, vec!["Capital call", "", "T-9"]);
    }

    #[test]
    fn test_numeric_field_kinds() {
        assert_eq!(NumericField::Amount.kind(), ValueKind::Currency);
        assert_eq!(NumericField::Rate.kind(), ValueKind::Percentage);
        assert_eq!(NumericField::CapacityUsed.kind(), ValueKind::Percentage);
    }

    #[test]
    fn test_tagged_record_serde() {
        let record: ListableRecord =
            PropertyRecord::new("P-1", "12 Oak St", "Polk County, FL", "Auction", "$4,500").into();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"property\""));

        let back: ListableRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
