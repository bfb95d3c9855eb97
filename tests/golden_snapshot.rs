use purchase_budget::golden::{
    compare_snapshot, standard_battery, take_snapshot, Snapshot, DEFAULT_SNAPSHOT_PATH,
};
use purchase_budget::{Calculator, TaxProfile};
use std::path::Path;

fn checked_in_snapshot() -> Snapshot {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_SNAPSHOT_PATH);
    Snapshot::load(path).unwrap()
}

#[test]
fn test_battery_matches_snapshot() {
    let expected = checked_in_snapshot();
    let actual = take_snapshot(&Calculator::default(), &standard_battery());

    let drifts = compare_snapshot(&expected, &actual);
    assert!(drifts.is_empty(), "drift: {:#?}", drifts);
}

#[test]
fn test_snapshot_covers_battery() {
    let snapshot = checked_in_snapshot();
    let battery = standard_battery();
    assert_eq!(snapshot.entries.len(), battery.len());
    for (entry, scenario) in snapshot.entries.iter().zip(&battery) {
        assert_eq!(entry.scenario, scenario.name);
    }
}

#[test]
fn test_snapshot_shape() {
    let snapshot = checked_in_snapshot();
    let figures = |name: &str| {
        snapshot
            .entries
            .iter()
            .find(|e| e.scenario == name)
            .and_then(|e| e.figures.clone())
    };

    assert!(figures("age-exhausted").is_none());
    assert!(figures("fees-exceed-equity").is_none());

    let investor = figures("non-resident-first-property").unwrap();
    assert_eq!(investor.tax_profile, TaxProfile::Investor);

    let short = figures("late-career-short-term").unwrap();
    assert_eq!(short.loan_term_years, 10);
    assert_eq!(short.schedule_months, 120);
}
