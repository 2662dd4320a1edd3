use approx::assert_relative_eq;
use ugaplan_calendar::CalendarData;
use ugaplan_demand::{DemandError, RequirementConfig, compute_requirements};
use ugaplan_zones::{RawZoneRecord, VegetationClass, load_zones};

#[test]
fn table_covers_irrigated_classes_and_months() {
    let cal = CalendarData::build(2025).unwrap();
    let table = compute_requirements(&cal, &RequirementConfig::new()).unwrap();
    assert_eq!(table.len(), 3 * 12);
    assert!(table.get(VegetationClass::None, 1).is_none());
}

#[test]
fn parks_never_below_general() {
    let cal = CalendarData::build(2025).unwrap();
    let table = compute_requirements(&cal, &RequirementConfig::new()).unwrap();
    for (_, req) in table.iter() {
        assert!(req.min_frequency_parks() >= req.min_frequency());
    }
}

#[test]
fn volume_proportional_to_base_frequency() {
    let cal = CalendarData::build(2025).unwrap();
    let cfg = RequirementConfig::new()
        .with_volume_per_visit_m3(3.0)
        .with_vegetation_factors([1.0, 0.5, 2.0]);
    let table = compute_requirements(&cal, &cfg).unwrap();

    let jan = |c| table.get(c, 1).unwrap().min_volume_m3();
    assert_relative_eq!(jan(VegetationClass::Turf), 6.0);
    assert_relative_eq!(jan(VegetationClass::Shrub), 3.0);
    assert_relative_eq!(jan(VegetationClass::Mixed), 12.0);

    let may = table.get(VegetationClass::Turf, 5).unwrap();
    assert_eq!(may.min_frequency(), 1);
    assert_relative_eq!(may.min_volume_m3(), 3.0);
}

#[test]
fn parameters_are_not_literals() {
    let cal = CalendarData::build(2025).unwrap();
    let cfg = RequirementConfig::new()
        .with_peak_months(vec![6, 7, 8])
        .with_peak_frequency(4)
        .with_off_peak_frequency(2)
        .with_park_bonus(2);
    let table = compute_requirements(&cal, &cfg).unwrap();
    let jul = table.get(VegetationClass::Turf, 7).unwrap();
    assert_eq!(jul.min_frequency(), 4);
    assert_eq!(jul.min_frequency_parks(), 6);
    let jan = table.get(VegetationClass::Turf, 1).unwrap();
    assert_eq!(jan.min_frequency(), 2);
}

#[test]
fn frequency_for_zone_kind() {
    let cal = CalendarData::build(2025).unwrap();
    let table = compute_requirements(&cal, &RequirementConfig::new()).unwrap();
    let zones = load_zones(&[RawZoneRecord::park(1, 100.0), RawZoneRecord::private(2, 100.0)]).unwrap();
    let req = table.get(VegetationClass::Turf, 1).unwrap();
    assert_eq!(req.frequency_for(&zones.zones()[0]), 3);
    assert_eq!(req.frequency_for(&zones.zones()[1]), 2);
}

#[test]
fn huge_frequencies_are_rejected_not_overflowed() {
    let cal = CalendarData::build(2025).unwrap();
    let configs = [
        RequirementConfig::new().with_park_bonus(u32::MAX),
        RequirementConfig::new().with_peak_frequency(u32::MAX),
        RequirementConfig::new()
            .with_off_peak_frequency(u32::MAX)
            .with_park_bonus(u32::MAX),
    ];
    for cfg in configs {
        assert!(matches!(
            cfg.validate(),
            Err(DemandError::InvalidRequirement { .. })
        ));
        assert!(compute_requirements(&cal, &cfg).is_err());
    }
}
