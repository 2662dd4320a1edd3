use ugaplan_zones::{RawZoneRecord, ZoneError, ZoneId, ZoneRule, load_zones};

#[test]
fn every_bad_record_is_reported() {
    let mut no_kind = RawZoneRecord::park(2, 100.0);
    no_kind.park = false;

    let records = vec![
        RawZoneRecord::park(1, 1000.0),
        no_kind,
        RawZoneRecord::street(3, 300.0, 0.0),
        RawZoneRecord::private(4, -5.0),
        RawZoneRecord::street(5, 300.0, 5.0),
    ];

    let err = load_zones(&records).unwrap_err();
    let ZoneError::Validation {
        count, violations, ..
    } = &err
    else {
        panic!("expected Validation, got {err:?}");
    };
    assert_eq!(*count, 3);
    let pairs: Vec<(ZoneId, ZoneRule)> = violations.iter().map(|v| (v.zone(), v.rule())).collect();
    assert_eq!(
        pairs,
        vec![
            (ZoneId(2), ZoneRule::NoKind),
            (ZoneId(3), ZoneRule::StreetWashVolume),
            (ZoneId(4), ZoneRule::NonPositiveArea),
        ]
    );
    assert!(err.to_string().starts_with("3 zone validation error(s): zone 2: no kind"));
}

#[test]
fn street_iff_no_vegetation_and_positive_wash() {
    let records = vec![
        RawZoneRecord::park(1, 800.0).with_vegetation_class(2),
        RawZoneRecord::private(2, 200.0).with_vegetation_class(3),
        RawZoneRecord::street(3, 500.0, 5.0),
    ];
    let reg = load_zones(&records).unwrap();
    for z in reg.zones() {
        let street_shape = z.vegetation().code() == 0 && z.wash_volume_m3() > 0.0;
        assert_eq!(z.is_street(), street_shape, "zone {}", z.id());
    }
}

#[test]
fn records_parse_from_toml() {
    #[derive(serde::Deserialize)]
    struct Doc {
        zones: Vec<RawZoneRecord>,
    }

    let text = r#"
        [[zones]]
        id = 1
        park = true
        has_spring = true
        vegetation_class = 1
        area_m2 = 1500.0

        [[zones]]
        id = 2
        street = true
        area_m2 = 400.0
        wash_volume_m3 = 5.0
    "#;
    let doc: Doc = toml::from_str(text).unwrap();
    let reg = load_zones(&doc.zones).unwrap();
    assert_eq!(reg.len(), 2);
    assert!(reg.get(ZoneId(1)).unwrap().has_spring());
    assert!(!reg.get(ZoneId(1)).unwrap().has_grey_infra());
}

#[test]
fn unknown_toml_field_rejected() {
    let text = r#"
        id = 1
        park = true
        area_m2 = 10.0
        colour = "green"
    "#;
    assert!(toml::from_str::<RawZoneRecord>(text).is_err());
}
