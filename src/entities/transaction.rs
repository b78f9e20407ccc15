// 💳 Transaction Entity - account activity listing

use super::{Listable, NumericField, TextField};
use serde::{Deserialize, Serialize};

/// One account transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,

    /// What happened (e.g., "Capital call - Fund II")
    pub description: String,

    #[serde(default)]
    pub counterparty: String,

    #[serde(default)]
    pub memo: String,

    /// Deposit, Withdrawal, Distribution, ...
    #[serde(rename = "type")]
    pub transaction_type: String,

    /// Currency display string, may be negative (e.g., "-$1,200.00")
    pub amount: String,

    /// Completed, Pending, Failed
    #[serde(default)]
    pub status: String,

    /// Listing date (e.g., "Jan 15, 2024, 09:30 AM")
    pub date: String,
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        transaction_type: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        TransactionRecord {
            id: id.into(),
            description: description.into(),
            counterparty: String::new(),
            memo: String::new(),
            transaction_type: transaction_type.into(),
            amount: amount.into(),
            status: String::new(),
            date: date.into(),
        }
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = counterparty.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

impl Listable for TransactionRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        &self.transaction_type
    }

    fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.description),
            TextField::Location => Some(&self.counterparty),
            TextField::Description => Some(&self.memo),
            TextField::Category => Some(&self.transaction_type),
            TextField::Id => Some(&self.id),
        }
    }

    fn numeric_field(&self, field: NumericField) -> Option<&str> {
        match field {
            NumericField::Amount => Some(&self.amount),
            NumericField::Rate | NumericField::CapacityUsed => None,
        }
    }

    fn date_field(&self) -> Option<&str> {
        Some(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_fields() {
        let tx = TransactionRecord::new("T-1", "Distribution Q4", "Distribution", "$1,250.00", "Jan 15, 2024, 09:30 AM")
            .with_counterparty("Redemption Fund II")
            .with_status("Completed");

        assert_eq!(tx.category(), "Distribution");
        assert_eq!(tx.text_field(TextField::Location), Some("Redemption Fund II"));
        assert_eq!(tx.numeric_field(NumericField::Amount), Some("$1,250.00"));
        assert_eq!(tx.numeric_field(NumericField::Rate), None);
        assert_eq!(tx.date_field(), Some("Jan 15, 2024, 09:30 AM"));
    }

    #[test]
    fn test_transaction_type_field_name() {
        let json = r#"{
            "id": "T-2",
            "description": "Wire out",
            "type": "Withdrawal",
            "amount": "-$5,000",
            "date": "Feb 2,2024, 04:15 PM"
        }"#;

        let tx: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, "Withdrawal");
        assert_eq!(tx.memo, "");
    }
}
