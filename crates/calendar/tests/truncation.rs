use ugaplan_calendar::{CalendarData, WeekId};

#[test]
fn truncation_keeps_prefix() {
    let full = CalendarData::build(2025).unwrap();
    let short = full.truncated(60).unwrap();
    assert_eq!(short.n_days(), 60);
    assert_eq!(&full.days()[..60], short.days());
    assert_eq!(short.months(), vec![1, 2, 3]);
}

#[test]
fn truncation_drops_wrapped_week_one_days() {
    let short = CalendarData::build(2025).unwrap().truncated(28).unwrap();
    let w1 = short.week(WeekId::new(1).unwrap()).unwrap();
    let ids: Vec<u16> = w1.days().iter().map(|d| d.get()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(short.week(WeekId::new(6).unwrap()).is_none());
}

#[test]
fn truncation_is_deterministic() {
    let a = CalendarData::build(2025).unwrap().truncated(100).unwrap();
    let b = CalendarData::build(2025).unwrap().truncated(100).unwrap();
    assert_eq!(a, b);
}

#[test]
fn full_truncation_is_identity() {
    let full = CalendarData::build(2025).unwrap();
    assert_eq!(full.truncated(365).unwrap(), full);
}
