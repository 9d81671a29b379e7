mod common;

use common::household;
use ledger_stats::{
    config::Config,
    core::services::{StatisticsService, StatsQuery},
    domain::{CategoryKind, LedgerSnapshot},
    stats::engine::TOTAL_ITEM_ID,
};

#[test]
fn typed_stats_stay_within_their_flow() {
    let fixture = household();
    let query = StatsQuery {
        kind: Some(CategoryKind::Income),
        ..StatsQuery::default()
    };
    let report = StatisticsService::category_stats(&fixture.snapshot, &query, &Config::default())
        .unwrap();

    assert_eq!(report.items.len(), 2);
    assert_eq!(report.items[0].id, fixture.salary.to_string());
    assert_eq!(report.items[0].share, 100.0);
    assert_eq!(report.items[1].id, TOTAL_ITEM_ID);
    assert_eq!(report.items[1].total_amount, 1000);
    assert_eq!(report.orphaned_transactions, 0);
}

#[test]
fn range_narrows_the_report() {
    let fixture = household();
    let query = StatsQuery {
        kind: Some(CategoryKind::Expense),
        from: Some("2024-03-01".into()),
        until: Some("2024-03-31".into()),
        ..StatsQuery::default()
    };
    let report = StatisticsService::category_stats(&fixture.snapshot, &query, &Config::default())
        .unwrap();
    let total = report.items.last().unwrap();
    assert_eq!(total.total_amount, 150);
}

#[test]
fn hidden_category_bookings_become_orphans() {
    let mut fixture = household();
    for category in &mut fixture.snapshot.categories {
        if category.id == fixture.transport {
            category.is_active = false;
        }
    }
    let query = StatsQuery {
        kind: Some(CategoryKind::Expense),
        ..StatsQuery::default()
    };

    let report = StatisticsService::category_stats(&fixture.snapshot, &query, &Config::default())
        .unwrap();
    assert_eq!(report.orphaned_transactions, 1);
    assert!(report
        .items
        .iter()
        .all(|item| item.id != fixture.transport.to_string()));

    let shown = StatsQuery {
        show_hidden: true,
        ..query
    };
    let report = StatisticsService::category_stats(&fixture.snapshot, &shown, &Config::default())
        .unwrap();
    assert_eq!(report.orphaned_transactions, 0);
    let transport = report
        .items
        .iter()
        .find(|item| item.id == fixture.transport.to_string())
        .unwrap();
    assert_eq!(transport.is_active, Some(false));
}

#[test]
fn config_labels_reach_the_report() {
    let fixture = household();
    let config = Config {
        total_title: "Everything".into(),
        ..Config::default()
    };
    let report =
        StatisticsService::category_stats(&fixture.snapshot, &StatsQuery::default(), &config)
            .unwrap();
    assert_eq!(report.items.last().unwrap().title, "Everything");
}

#[test]
fn category_tree_nests_children_without_amounts() {
    let fixture = household();
    let query = StatsQuery {
        kind: Some(CategoryKind::Expense),
        ..StatsQuery::default()
    };
    let tree = StatisticsService::category_tree(&fixture.snapshot, &query);

    let titles: Vec<&str> = tree.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["Food", "Transport"]);
    let children = tree[0].children.as_deref().unwrap();
    assert_eq!(children[0].id, fixture.groceries.to_string());
    assert_eq!(children[1].id, fixture.restaurants.to_string());
    assert!(tree[1].children.is_none());

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json[0]["isActive"], true);
    assert!(json[0].get("selfAmount").is_none());
}

#[test]
fn empty_snapshot_reports_a_zero_total() {
    let report = StatisticsService::category_stats(
        &LedgerSnapshot::default(),
        &StatsQuery::default(),
        &Config::default(),
    )
    .unwrap();
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].total_amount, 0);
}

#[test]
fn malformed_date_is_rejected() {
    let fixture = household();
    let query = StatsQuery {
        from: Some("March 1st".into()),
        ..StatsQuery::default()
    };
    assert!(
        StatisticsService::category_stats(&fixture.snapshot, &query, &Config::default()).is_err()
    );
}
