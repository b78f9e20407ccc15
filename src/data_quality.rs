// ✅ Data Quality Engine - flags what the pipeline silently recovers from
//
// The listing never fails on a bad "$1,2,00" or "Jan 32,2024": it sorts the
// value as 0 or as the epoch. This engine runs the strict parsers over every
// display string so those fallbacks show up in a report instead.

use crate::config::DatasetConfig;
use crate::entities::{Listable, NumericField};
use crate::filter::FilterPredicate;
use crate::parser;
use serde::{Deserialize, Serialize};

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub rule_name: String,
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationResult {
    pub fn pass(rule_name: &str, field: &str, message: &str) -> Self {
        ValidationResult {
            passed: true,
            rule_name: rule_name.to_string(),
            field: field.to_string(),
            message: message.to_string(),
            severity: Severity::Info,
        }
    }

    pub fn fail(rule_name: &str, field: &str, message: &str, severity: Severity) -> Self {
        ValidationResult {
            passed: false,
            rule_name: rule_name.to_string(),
            field: field.to_string(),
            message: message.to_string(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical, // Record cannot be identified or filtered
    Warning,  // Value falls back to 0 / epoch when sorted
    Info,     // Value is usable but incomplete
}

// ============================================================================
// QUALITY REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub field: String,
    /// Display string as stored
    pub raw: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub record_id: String,
    pub overall_quality: f64,
    pub validations: Vec<ValidationResult>,
    pub issues: Vec<QualityIssue>,
    pub passed_count: usize,
    pub failed_count: usize,
    pub needs_review: bool,
}

impl QualityReport {
    pub fn summary(&self) -> String {
        format!(
            "{}: quality {:.1}%, issues: {} ({} critical)",
            self.record_id,
            self.overall_quality * 100.0,
            self.issues.len(),
            self.issues
                .iter()
                .filter(|i| i.severity == Severity::Critical)
                .count()
        )
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    fn record(&mut self, result: ValidationResult, raw: &str) {
        if !result.passed {
            self.issues.push(QualityIssue {
                severity: result.severity,
                field: result.field.clone(),
                raw: raw.to_string(),
                message: result.message.clone(),
            });
        }
        self.validations.push(result);
    }
}

// ============================================================================
// DATA QUALITY ENGINE
// ============================================================================

pub struct DataQualityEngine<'a> {
    listing: &'a str,
    filters: FilterPredicate<'a>,
}

impl<'a> DataQualityEngine<'a> {
    pub fn new(config: &'a DatasetConfig) -> Self {
        DataQualityEngine {
            listing: &config.name,
            filters: config.filter_predicate(),
        }
    }

    /// Validate one record's identity, category and display strings
    pub fn validate<R: Listable + ?Sized>(&self, record: &R) -> QualityReport {
        let mut report = QualityReport {
            record_id: record.id().to_string(),
            overall_quality: 1.0,
            validations: Vec::new(),
            issues: Vec::new(),
            passed_count: 0,
            failed_count: 0,
            needs_review: false,
        };

        // Rule 1: identity present
        report.record(self.validate_id(record.id()), record.id());

        // Rule 2: category present and reachable from a filter chip
        report.record(self.validate_category(record.category()), record.category());

        // Rule 3: every numeric display string parses
        for field in NumericField::all() {
            if let Some(raw) = record.numeric_field(field) {
                report.record(self.validate_numeric(field, raw), raw);
            }
        }

        // Rule 4: listing date parses
        if let Some(raw) = record.date_field() {
            report.record(self.validate_date(raw), raw);
        }

        report.passed_count = report.validations.iter().filter(|v| v.passed).count();
        report.failed_count = report.validations.len() - report.passed_count;
        report.overall_quality = report.passed_count as f64 / report.validations.len() as f64;
        report.needs_review = report
            .issues
            .iter()
            .any(|i| matches!(i.severity, Severity::Critical | Severity::Warning));

        for issue in report.issues.iter().filter(|i| i.severity != Severity::Info) {
            tracing::warn!(
                listing = %self.listing,
                record = %report.record_id,
                field = %issue.field,
                raw = %issue.raw,
                "{}",
                issue.message
            );
        }

        report
    }

    /// Batch validate a whole dataset
    pub fn validate_batch<R: Listable>(&self, records: &[R]) -> Vec<QualityReport> {
        records.iter().map(|record| self.validate(record)).collect()
    }

    /// Generate summary statistics for batch validation
    pub fn batch_summary(&self, reports: &[QualityReport]) -> BatchSummary {
        let total = reports.len();
        let clean = reports.iter().filter(|r| r.is_clean()).count();
        let needs_review = reports.iter().filter(|r| r.needs_review).count();
        let has_critical = reports.iter().filter(|r| r.has_critical_issues()).count();
        let fallback_values = reports
            .iter()
            .flat_map(|r| r.issues.iter())
            .filter(|i| i.severity == Severity::Warning)
            .count();

        let average_quality = if total == 0 {
            1.0
        } else {
            reports.iter().map(|r| r.overall_quality).sum::<f64>() / total as f64
        };

        BatchSummary {
            total_records: total,
            clean_count: clean,
            needs_review_count: needs_review,
            critical_issues_count: has_critical,
            fallback_values_count: fallback_values,
            average_quality,
        }
    }

    // ========================================================================
    // VALIDATION RULES
    // ========================================================================

    fn validate_id(&self, id: &str) -> ValidationResult {
        if id.trim().is_empty() {
            return ValidationResult::fail("id_not_empty", "id", "Identifier is empty", Severity::Critical);
        }
        ValidationResult::pass("id_not_empty", "id", "Identifier present")
    }

    fn validate_category(&self, category: &str) -> ValidationResult {
        if category.trim().is_empty() {
            return ValidationResult::fail(
                "category_not_empty",
                "category",
                "Category is empty; no filter other than the wildcard can select it",
                Severity::Critical,
            );
        }

        if self.filters.label_for_category(category).is_none() {
            return ValidationResult::fail(
                "category_filterable",
                "category",
                &format!("No filter label selects category {:?}", category),
                Severity::Info,
            );
        }

        ValidationResult::pass("category_filterable", "category", "Category has a filter label")
    }

    fn validate_numeric(&self, field: NumericField, raw: &str) -> ValidationResult {
        let kind = field.kind();

        if raw.trim().is_empty() {
            return ValidationResult::fail(
                "value_present",
                field.as_str(),
                &format!("Missing {} value, sorts as 0", kind.as_str()),
                Severity::Info,
            );
        }

        match kind.try_parse(raw) {
            Some(_) => ValidationResult::pass("value_parses", field.as_str(), "Value parses"),
            None => ValidationResult::fail(
                "value_parses",
                field.as_str(),
                &format!("Unparsable {} value, sorts as 0", kind.as_str()),
                Severity::Warning,
            ),
        }
    }

    fn validate_date(&self, raw: &str) -> ValidationResult {
        match parser::try_parse_date(raw) {
            Some(_) => ValidationResult::pass("date_parses", "date", "Date parses"),
            None => ValidationResult::fail(
                "date_parses",
                "date",
                "Unparsable date, sorts as the epoch",
                Severity::Warning,
            ),
        }
    }
}

// ============================================================================
// BATCH SUMMARY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub clean_count: usize,
    pub needs_review_count: usize,
    pub critical_issues_count: usize,
    /// Values that fall back to 0 or the epoch when sorted
    pub fallback_values_count: usize,
    pub average_quality: f64,
}

impl BatchSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} records: {:.1}% quality | {} clean, {} need review, {} critical, {} fallback values",
            self.total_records,
            self.average_quality * 100.0,
            self.clean_count,
            self.needs_review_count,
            self.critical_issues_count,
            self.fallback_values_count
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
