// 📂 Fixture Loading - JSON / CSV datasets → records
// Loading sits outside the pure pipeline: it can fail, the listing cannot.

use crate::config::DatasetConfig;
use crate::entities::{FundRecord, Listable, ListableRecord, PropertyRecord, TransactionRecord};
use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// DATASET KIND
// ============================================================================

/// Which listing a fixture feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Properties,
    Funds,
    Transactions,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Properties => "properties",
            DatasetKind::Funds => "funds",
            DatasetKind::Transactions => "transactions",
        }
    }

    /// Built-in configuration preset for this listing
    pub fn config(&self) -> DatasetConfig {
        match self {
            DatasetKind::Properties => DatasetConfig::properties(),
            DatasetKind::Funds => DatasetConfig::funds(),
            DatasetKind::Transactions => DatasetConfig::transactions(),
        }
    }

    /// Load a `.json` or `.csv` fixture as records of this kind
    pub fn load(&self, path: &Path) -> Result<Vec<ListableRecord>> {
        let records = match self {
            DatasetKind::Properties => load_records::<PropertyRecord>(path)?,
            DatasetKind::Funds => load_records::<FundRecord>(path)?,
            DatasetKind::Transactions => load_records::<TransactionRecord>(path)?,
        };

        warn_on_duplicate_ids(&records, path);
        Ok(records)
    }
}

impl FromStr for DatasetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "properties" | "property" => Ok(DatasetKind::Properties),
            "funds" | "fund" => Ok(DatasetKind::Funds),
            "transactions" | "transaction" | "tx" => Ok(DatasetKind::Transactions),
            other => Err(anyhow!(
                "Unknown dataset kind {:?} (expected properties, funds or transactions)",
                other
            )),
        }
    }
}

// ============================================================================
// LOADERS
// ============================================================================

/// Load a JSON array of records
pub fn load_json<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture: {:?}", path))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse fixture JSON: {:?}", path))
}

/// Load a CSV file with one record per row (headers = field names)
pub fn load_csv<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path))?;

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<R>().enumerate() {
        let record: R = result.with_context(|| format!("Failed to deserialize CSV row {}", index + 1))?;
        records.push(record);
    }

    Ok(records)
}

fn load_records<R>(path: &Path) -> Result<Vec<ListableRecord>>
where
    R: DeserializeOwned + Into<ListableRecord>,
{
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let records: Vec<R> = match extension.as_deref() {
        Some("json") => load_json(path)?,
        Some("csv") => load_csv(path)?,
        _ => bail!("Unsupported fixture format: {:?} (expected .json or .csv)", path),
    };

    Ok(records.into_iter().map(Into::into).collect())
}

/// Ids tie-break every sort; duplicates make that order ambiguous
fn warn_on_duplicate_ids(records: &[ListableRecord], path: &Path) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            tracing::warn!(id = %record.id(), fixture = ?path, "duplicate record id");
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("funds".parse::<DatasetKind>().unwrap(), DatasetKind::Funds);
        assert_eq!("Property".parse::<DatasetKind>().unwrap(), DatasetKind::Properties);
        assert_eq!("tx".parse::<DatasetKind>().unwrap(), DatasetKind::Transactions);
        assert!("loans".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn test_load_json_funds() {
        let records = DatasetKind::Funds.load(&fixture("funds.json")).unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.kind_name() == "fund"));
    }

    #[test]
    fn test_load_csv_transactions() {
        let records = DatasetKind::Transactions.load(&fixture("transactions.csv")).unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.kind_name() == "transaction"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DatasetKind::Funds.load(Path::new("funds.xml")).unwrap_err();
        assert!(err.to_string().contains("Unsupported fixture format"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_json::<FundRecord>(&fixture("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read fixture"));
    }

    #[test]
    fn test_kind_config_matches_preset() {
        assert_eq!(DatasetKind::Funds.config(), DatasetConfig::funds());
        assert_eq!(DatasetKind::Transactions.as_str(), "transactions");
    }
}
