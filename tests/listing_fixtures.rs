// End-to-end listings over the bundled fixtures

use asset_listing::{
    query, Criteria, DataQualityEngine, DatasetConfig, DatasetKind, Listable, ListableRecord,
    ListingController, VisibleSlice,
};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn load(kind: DatasetKind, name: &str) -> Vec<ListableRecord> {
    kind.load(&fixture(name)).unwrap()
}

fn ids(slice: &VisibleSlice<'_, ListableRecord>) -> Vec<String> {
    slice.visible_records.iter().map(|r| r.id().to_string()).collect()
}

// ============================================================================
// Funds
// ============================================================================

#[test]
fn funds_default_listing_is_highest_irr() {
    let records = load(DatasetKind::Funds, "funds.json");
    let config = DatasetConfig::funds();
    let criteria = Criteria::for_config(&config);

    let page1 = query(&records, &config, &criteria);
    assert_eq!(ids(&page1), vec!["F-006", "F-002", "F-004", "F-007", "F-001", "F-003"]);
    assert_eq!(page1.total_matching, 8);
    assert_eq!(page1.total_pages, 2);
    assert_eq!(page1.caption(), "Showing 1-6 of 8");

    // "7-8%" parses as 7; "pending" falls back to 0
    let page2 = query(&records, &config, &criteria.with_page(2));
    assert_eq!(ids(&page2), vec!["F-005", "F-008"]);
    assert_eq!(page2.caption(), "Showing 7-8 of 8");
}

#[test]
fn funds_filter_label_maps_to_fund_type() {
    let records = load(DatasetKind::Funds, "funds.json");
    let config = DatasetConfig::funds();

    let criteria = Criteria::for_config(&config).with_filter("Redemption Fund");
    let slice = query(&records, &config, &criteria);
    assert_eq!(ids(&slice), vec!["F-004", "F-007", "F-001"]);

    // The bare category is not a configured label
    let raw = Criteria::for_config(&config).with_filter("Redemption");
    assert_eq!(query(&records, &config, &raw).total_matching, 0);
}

#[test]
fn funds_search_is_case_insensitive() {
    let records = load(DatasetKind::Funds, "funds.json");
    let config = DatasetConfig::funds();

    let criteria = Criteria::for_config(&config).with_search("REDEMPTION");
    assert_eq!(ids(&query(&records, &config, &criteria)), vec!["F-004", "F-007", "F-001"]);

    // Strategy text is searchable too
    let criteria = Criteria::for_config(&config).with_search("arizona");
    assert_eq!(ids(&query(&records, &config, &criteria)), vec!["F-002"]);
}

#[test]
fn funds_name_sort_is_alphabetical() {
    let records = load(DatasetKind::Funds, "funds.json");
    let config = DatasetConfig::funds();

    let criteria = Criteria::for_config(&config).with_sort("Name (A-Z)");
    let slice = query(&records, &config, &criteria);
    assert_eq!(ids(&slice), vec!["F-007", "F-002", "F-008", "F-003", "F-005", "F-006"]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn properties_newest_puts_unparsable_then_missing_dates_last() {
    let records = load(DatasetKind::Properties, "properties.json");
    let config = DatasetConfig::properties();
    let criteria = Criteria::for_config(&config);

    let page1 = query(&records, &config, &criteria);
    assert_eq!(
        ids(&page1),
        vec!["P-1009", "P-1007", "P-1004", "P-1005", "P-1002", "P-1001", "P-1010", "P-1006", "P-1003"]
    );

    // "TBD" sorts as the epoch; no date at all sorts older still
    let page2 = query(&records, &config, &criteria.with_page(2));
    assert_eq!(ids(&page2), vec!["P-1011", "P-1008"]);
}

#[test]
fn properties_price_low_to_high_treats_unparsable_as_zero() {
    let records = load(DatasetKind::Properties, "properties.json");
    let config = DatasetConfig::properties();

    let criteria = Criteria::for_config(&config).with_sort("Price (Low to High)");
    let slice = query(&records, &config, &criteria);
    assert_eq!(&ids(&slice)[..4], ["P-1011", "P-1009", "P-1005", "P-1001"]);
}

#[test]
fn properties_filter_and_search_compose() {
    let records = load(DatasetKind::Properties, "properties.json");
    let config = DatasetConfig::properties();

    let auctions = Criteria::for_config(&config).with_filter("Upcoming Auctions");
    assert_eq!(query(&records, &config, &auctions).total_matching, 5);

    let oak = Criteria::for_config(&config).with_search("oak");
    assert_eq!(ids(&query(&records, &config, &oak)), vec!["P-1002", "P-1006"]);

    let both = auctions.with_search("az");
    assert_eq!(ids(&query(&records, &config, &both)), vec!["P-1009", "P-1005"]);
}

#[test]
fn properties_unlabelled_status_only_shows_under_wildcard() {
    let records = load(DatasetKind::Properties, "properties.json");
    let config = DatasetConfig::properties();

    let struck = Criteria::for_config(&config).with_filter("Struck Off");
    assert_eq!(query(&records, &config, &struck).total_matching, 0);

    let all = Criteria::for_config(&config);
    assert_eq!(query(&records, &config, &all).total_matching, 11);
}

// ============================================================================
// Transactions
// ============================================================================

#[test]
fn transactions_newest_across_two_pages() {
    let records = load(DatasetKind::Transactions, "transactions.json");
    let config = DatasetConfig::transactions();
    let criteria = Criteria::for_config(&config);

    let page1 = query(&records, &config, &criteria);
    assert_eq!(page1.visible_records.len(), 10);
    assert_eq!(page1.visible_records[0].id(), "TX-0011");
    assert_eq!(page1.total_pages, 2);

    let page2 = query(&records, &config, &criteria.with_page(2));
    assert_eq!(ids(&page2), vec!["TX-0001", "TX-0012"]);
}

#[test]
fn transactions_search_covers_counterparty_and_id() {
    let records = load(DatasetKind::Transactions, "transactions.json");
    let config = DatasetConfig::transactions();

    let chase = Criteria::for_config(&config).with_search("chase");
    assert_eq!(ids(&query(&records, &config, &chase)), vec!["TX-0009", "TX-0001"]);

    let by_id = Criteria::for_config(&config).with_search("tx-001");
    assert_eq!(query(&records, &config, &by_id).total_matching, 3);
}

#[test]
fn transactions_signed_amount_sorts() {
    let records = load(DatasetKind::Transactions, "transactions.json");
    let config = DatasetConfig::transactions();

    let fees = Criteria::for_config(&config)
        .with_filter("Fees")
        .with_sort("Amount (High to Low)");
    assert_eq!(ids(&query(&records, &config, &fees)), vec!["TX-0011", "TX-0004"]);

    let withdrawals = Criteria::for_config(&config)
        .with_filter("Withdrawals")
        .with_sort("Amount (Low to High)");
    assert_eq!(
        ids(&query(&records, &config, &withdrawals)),
        vec!["TX-0010", "TX-0002", "TX-0009", "TX-0005"]
    );
}

#[test]
fn transactions_csv_fixture_lists_the_same_way() {
    let records = load(DatasetKind::Transactions, "transactions.csv");
    let config = DatasetConfig::transactions();

    let criteria = Criteria::for_config(&config).with_sort("Oldest");
    let slice = query(&records, &config, &criteria);
    assert_eq!(ids(&slice), vec!["TX-0101", "TX-0102", "TX-0104", "TX-0103", "TX-0105"]);
}

// ============================================================================
// Controller over fixtures
// ============================================================================

#[test]
fn controller_resets_page_and_keeps_view_mode_cheap() {
    let records = load(DatasetKind::Transactions, "transactions.json");
    let config = DatasetConfig::transactions().with_page_size(4);
    let mut listing = ListingController::new(&records, &config);

    listing.set_page(3);
    assert_eq!(listing.criteria().current_page, 3);
    let runs = listing.pipeline_runs();

    listing.set_view_mode(listing.criteria().view_mode.toggle());
    listing.set_page(2);
    assert_eq!(listing.pipeline_runs(), runs);

    listing.set_sort_key("Oldest");
    assert_eq!(listing.criteria().current_page, 1);
    assert_eq!(listing.pipeline_runs(), runs + 1);
    assert_eq!(listing.visible().visible_records[0].id(), "TX-0012");
}

// ============================================================================
// Data quality over fixtures
// ============================================================================

#[test]
fn audit_flags_fallback_values() {
    let cases = [
        (DatasetKind::Funds, "funds.json", 8),
        (DatasetKind::Properties, "properties.json", 11),
        (DatasetKind::Transactions, "transactions.json", 12),
    ];

    for (kind, name, total) in cases {
        let records = load(kind, name);
        let config = kind.config();
        let engine = DataQualityEngine::new(&config);

        let reports = engine.validate_batch(&records);
        let summary = engine.batch_summary(&reports);

        assert_eq!(summary.total_records, total, "{}", name);
        assert_eq!(summary.needs_review_count, 1, "{}", name);
        assert_eq!(summary.fallback_values_count, 2, "{}", name);
        assert_eq!(summary.critical_issues_count, 0, "{}", name);
    }
}
