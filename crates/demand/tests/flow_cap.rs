use ugaplan_demand::{FlowCapConfig, PLAUSIBLE_FLOW_RANGE, flow_cap};
use ugaplan_zones::{RawZoneRecord, load_zones};

fn cap_for_largest(area: f64) -> f64 {
    let zones = load_zones(&[RawZoneRecord::park(1, area), RawZoneRecord::private(2, 10.0)]).unwrap();
    flow_cap(&FlowCapConfig::new(), &zones).unwrap().per_hour()
}

#[test]
fn clamps_to_lower_bound() {
    assert_eq!(cap_for_largest(500.0), 3.0);
}

#[test]
fn clamps_to_upper_bound() {
    assert_eq!(cap_for_largest(50_000.0), 8.0);
}

#[test]
fn rounds_to_one_decimal() {
    // 0.002 × 2345 = 4.69
    assert_eq!(cap_for_largest(2345.0), 4.7);
}

#[test]
fn always_inside_plausible_range() {
    let (lo, hi) = PLAUSIBLE_FLOW_RANGE;
    for area in [1.0, 100.0, 1500.0, 3333.3, 4000.0, 1e6] {
        let cap = cap_for_largest(area);
        assert!((lo..=hi).contains(&cap), "area {area} gave {cap}");
    }
}

#[test]
fn fixed_override_wins() {
    let zones = load_zones(&[RawZoneRecord::park(1, 50_000.0)]).unwrap();
    let cap = flow_cap(&FlowCapConfig::new().with_fixed(5.5), &zones).unwrap();
    assert_eq!(cap.per_hour(), 5.5);
}
