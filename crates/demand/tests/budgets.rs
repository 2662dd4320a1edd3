use approx::assert_relative_eq;
use ugaplan_calendar::CalendarData;
use ugaplan_demand::{DemandConfig, compute_budgets};
use ugaplan_zones::{RawZoneRecord, ZoneRegistry, load_zones};

fn registry() -> ZoneRegistry {
    load_zones(&[
        RawZoneRecord::park(1, 6000.0),
        RawZoneRecord::private(2, 1000.0),
        RawZoneRecord::street(3, 5000.0, 5.0),
    ])
    .unwrap()
}

#[test]
fn reference_budgets() {
    let cal = CalendarData::build(2025).unwrap();
    let table = compute_budgets(&registry(), &cal, &DemandConfig::new()).unwrap();
    assert_eq!(table.len(), 12);

    // 12 000 m² × 0.007 / 12 = 7 m³ before the seasonal factor.
    let jan = table.get(1).unwrap();
    assert_relative_eq!(jan.potable_m3(), 7.0 * 1.3, epsilon = 1e-12);
    assert_relative_eq!(jan.grey_m3(), 7.0 * 1.3 * 0.4, epsilon = 1e-12);

    let jul = table.get(7).unwrap();
    assert_relative_eq!(jul.potable_m3(), 7.0 * 0.9, epsilon = 1e-12);

    let apr = table.get(4).unwrap();
    assert_relative_eq!(apr.potable_m3(), 7.0, epsilon = 1e-12);
}

#[test]
fn peak_trough_ratio_is_tunable() {
    let cal = CalendarData::build(2025).unwrap();
    let cfg = DemandConfig::new().with_peak_trough(2.0, 0.5);
    let table = compute_budgets(&registry(), &cal, &cfg).unwrap();
    let ratio = table.get(1).unwrap().potable_m3() / table.get(6).unwrap().potable_m3();
    assert_relative_eq!(ratio, 4.0, epsilon = 1e-12);
}

#[test]
fn grey_fraction_applies_every_month() {
    let cal = CalendarData::build(2025).unwrap();
    let cfg = DemandConfig::new().with_grey_fraction(0.25);
    let table = compute_budgets(&registry(), &cal, &cfg).unwrap();
    for b in table.iter() {
        assert_relative_eq!(b.grey_m3(), 0.25 * b.potable_m3(), epsilon = 1e-12);
    }
}

#[test]
fn truncated_calendar_covers_only_its_months() {
    let cal = CalendarData::build(2025).unwrap().truncated(40).unwrap();
    let table = compute_budgets(&registry(), &cal, &DemandConfig::new()).unwrap();
    let months: Vec<u8> = table.iter().map(|b| b.month()).collect();
    assert_eq!(months, vec![1, 2]);
    assert!(table.get(3).is_none());
}

#[test]
fn invalid_config_fails_before_computation() {
    let cal = CalendarData::build(2025).unwrap();
    let cfg = DemandConfig::new().with_allocation_rate(-1.0);
    assert!(compute_budgets(&registry(), &cal, &cfg).is_err());
}
