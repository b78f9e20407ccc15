// 💱 Value Parser - display strings → comparable values
// Currency, percentage and listing-date strings are the only source of
// sortable magnitude. Every `parse_*` here is total: bad input gets a fallback.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// FORMATS
// ============================================================================

/// Listing date-time format, e.g. "Jan 15, 2024, 09:30 AM"
pub const LISTING_DATE_FORMAT: &str = "%b %d, %Y, %I:%M %p";

/// Date-only variant, e.g. "Jan 15, 2024"
pub const LISTING_DAY_FORMAT: &str = "%b %d, %Y";

/// Fallback for unparsable dates (the epoch sorts as oldest)
pub const EPOCH_MILLIS: i64 = 0;

// ============================================================================
// VALUE KIND
// ============================================================================

/// Which parser reads a display-formatted numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// "$1,250,000", "-$45.99"
    Currency,
    /// "18.5%", "12-15%"
    Percentage,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Currency => "currency",
            ValueKind::Percentage => "percentage",
        }
    }

    /// Strict parse: `None` when the string carries no usable number
    pub fn try_parse(&self, raw: &str) -> Option<f64> {
        match self {
            ValueKind::Currency => try_parse_currency(raw),
            ValueKind::Percentage => try_parse_percentage(raw),
        }
    }

    /// Total parse: falls back to `0.0`
    pub fn parse(&self, raw: &str) -> f64 {
        match self {
            ValueKind::Currency => parse_currency(raw),
            ValueKind::Percentage => parse_percentage(raw),
        }
    }
}

// ============================================================================
// CURRENCY
// ============================================================================

/// Parse a currency string: keep only digits, `.` and `-`, then read the
/// leading number.
///
/// "$1,234" → 1234.0, "-$45.99" → -45.99, "$1,200 - $1,500" → 1200.0,
/// "N/A" → None
pub fn try_parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let end = leading_number_len(&cleaned);

    cleaned[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Same as [`try_parse_currency`], but unparsable input yields `0.0`
pub fn parse_currency(raw: &str) -> f64 {
    try_parse_currency(raw).unwrap_or_else(|| {
        tracing::debug!(raw = %raw, "unparsable currency value, using 0");
        0.0
    })
}

// ============================================================================
// PERCENTAGE
// ============================================================================

/// Parse the leading number of a percentage string.
///
/// Ranges use the lower bound: "12-15%" → 12.0
pub fn try_parse_percentage(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let end = leading_number_len(body);

    body[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Same as [`try_parse_percentage`], but unparsable input yields `0.0`
pub fn parse_percentage(raw: &str) -> f64 {
    try_parse_percentage(raw).unwrap_or_else(|| {
        tracing::debug!(raw = %raw, "unparsable percentage value, using 0");
        0.0
    })
}

/// Byte length of the `[+-]?digits[.digits]` prefix
fn leading_number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        i = 1;
    }

    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {}
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        i += 1;
    }
    i
}

// ============================================================================
// DATES
// ============================================================================

/// Normalize comma spacing and whitespace.
///
/// Fixtures sometimes glue the year to the comma ("Jan 15,2024, 09:30 AM").
pub fn normalize_listing_date(raw: &str) -> String {
    raw.split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse "<Mon> <D>, <YYYY>, <HH:MM> <AM|PM>" (or the date-only form)
pub fn try_parse_date(raw: &str) -> Option<NaiveDateTime> {
    let normalized = normalize_listing_date(raw);

    if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, LISTING_DATE_FORMAT) {
        return Some(dt);
    }

    NaiveDate::parse_from_str(&normalized, LISTING_DAY_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Milliseconds since the epoch; unparsable input yields [`EPOCH_MILLIS`]
pub fn parse_date(raw: &str) -> i64 {
    match try_parse_date(raw) {
        Some(dt) => dt.and_utc().timestamp_millis(),
        None => {
            tracing::debug!(raw = %raw, "unparsable listing date, using epoch");
            EPOCH_MILLIS
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
