// 🏠 Property Entity - tax-deed property listing
//
// "$4,500" opening bids and "18%" statutory rates stay as display strings;
// the parser recovers their magnitude when a listing sorts on them.

use super::{Listable, NumericField, TextField};
use serde::{Deserialize, Serialize};

/// One tax-deed property row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,

    /// Street address (e.g., "1421 Lakeview Dr")
    pub address: String,

    /// County and state (e.g., "Polk County, FL")
    pub location: String,

    #[serde(default)]
    pub description: String,

    /// Auction, Redemption, Sold, ...
    pub status: String,

    /// Currency display string (e.g., "$4,500")
    pub opening_bid: String,

    /// Percentage display string (e.g., "18%")
    #[serde(default)]
    pub interest_rate: String,

    /// Listing date (e.g., "Jan 15, 2024, 09:30 AM")
    #[serde(default)]
    pub auction_date: Option<String>,
}

impl PropertyRecord {
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        location: impl Into<String>,
        status: impl Into<String>,
        opening_bid: impl Into<String>,
    ) -> Self {
        PropertyRecord {
            id: id.into(),
            address: address.into(),
            location: location.into(),
            description: String::new(),
            status: status.into(),
            opening_bid: opening_bid.into(),
            interest_rate: String::new(),
            auction_date: None,
        }
    }

    /// Builder pattern: add description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder pattern: add interest rate
    pub fn with_interest_rate(mut self, rate: impl Into<String>) -> Self {
        self.interest_rate = rate.into();
        self
    }

    /// Builder pattern: add auction date
    pub fn with_auction_date(mut self, date: impl Into<String>) -> Self {
        self.auction_date = Some(date.into());
        self
    }
}

impl Listable for PropertyRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        &self.status
    }

    fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.address),
            TextField::Location => Some(&self.location),
            TextField::Description => Some(&self.description),
            TextField::Category => Some(&self.status),
            TextField::Id => Some(&self.id),
        }
    }

    fn numeric_field(&self, field: NumericField) -> Option<&str> {
        match field {
            NumericField::Amount => Some(&self.opening_bid),
            NumericField::Rate => Some(&self.interest_rate),
            NumericField::CapacityUsed => None,
        }
    }

    fn date_field(&self) -> Option<&str> {
        self.auction_date.as_deref()
    }
}
