// 📈 Fund Entity - investment fund listing

use super::{Listable, NumericField, TextField};
use serde::{Deserialize, Serialize};

/// One investment fund row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRecord {
    pub id: String,
    pub name: String,

    /// Strategy / geography (e.g., "Tax liens · Southeast US")
    #[serde(default)]
    pub strategy: String,

    #[serde(default)]
    pub description: String,

    /// Redemption, Acquisition, Income, ...
    pub fund_type: String,

    /// Currency display string (e.g., "$25,000,000")
    pub fund_size: String,

    /// Single value or range (e.g., "14%", "12-15%")
    pub target_irr: String,

    /// Percentage display string (e.g., "85%")
    #[serde(default)]
    pub capacity_used: String,

    #[serde(default)]
    pub launch_date: Option<String>,
}

impl FundRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        fund_type: impl Into<String>,
        fund_size: impl Into<String>,
        target_irr: impl Into<String>,
    ) -> Self {
        FundRecord {
            id: id.into(),
            name: name.into(),
            strategy: String::new(),
            description: String::new(),
            fund_type: fund_type.into(),
            fund_size: fund_size.into(),
            target_irr: target_irr.into(),
            capacity_used: String::new(),
            launch_date: None,
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_capacity_used(mut self, capacity: impl Into<String>) -> Self {
        self.capacity_used = capacity.into();
        self
    }

    pub fn with_launch_date(mut self, date: impl Into<String>) -> Self {
        self.launch_date = Some(date.into());
        self
    }
}

impl Listable for FundRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        &self.fund_type
    }

    fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Location => Some(&self.strategy),
            TextField::Description => Some(&self.description),
            TextField::Category => Some(&self.fund_type),
            TextField::Id => Some(&self.id),
        }
    }

    fn numeric_field(&self, field: NumericField) -> Option<&str> {
        match field {
            NumericField::Amount => Some(&self.fund_size),
            NumericField::Rate => Some(&self.target_irr),
            NumericField::CapacityUsed => Some(&self.capacity_used),
        }
    }

    fn date_field(&self) -> Option<&str> {
        self.launch_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_fields() {
        let fund = FundRecord::new("F-2", "Gulf Coast Income", "Income", "$8,000,000", "9%")
            .with_strategy("Tax liens · Gulf Coast")
            .with_capacity_used("40%")
            .with_launch_date("Jun 1, 2023, 08:00 AM");

        assert_eq!(fund.category(), "Income");
        assert_eq!(fund.text_field(TextField::Location), Some("Tax liens · Gulf Coast"));
        assert_eq!(fund.numeric_field(NumericField::Amount), Some("$8,000,000"));
        assert_eq!(fund.numeric_field(NumericField::CapacityUsed), Some("40%"));
        assert_eq!(fund.date_field(), Some("Jun 1, 2023, 08:00 AM"));
    }

    #[test]
    fn test_fund_deserialize_camel_case() {
        let json = r#"{
            "id": "F-3",
            "name": "Redemption Fund II",
            "fundType": "Redemption",
            "fundSize": "$12,500,000",
            "targetIrr": "12-15%",
            "capacityUsed": "62%"
        }"#;

        let fund: FundRecord = serde_json::from_str(json).unwrap();
        assert_eq!(fund.target_irr, "12-15%");
        assert_eq!(fund.capacity_used, "62%");
        assert_eq!(fund.strategy, "");
    }
}
