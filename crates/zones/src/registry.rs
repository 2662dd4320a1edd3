//! Zone registry construction and lookups.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::error::ZoneError;
use crate::record::RawZoneRecord;
use crate::validate::{ViolationCollector, ZoneRule, validate_record};
use crate::zone::{Zone, ZoneId, ZoneKind};

/// Immutable, validated set of zones.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    index: BTreeMap<ZoneId, usize>,
}

/// Validates raw records and builds a [`ZoneRegistry`].
///
/// All records are checked before failing, so the returned error lists
/// every violation in the batch.
///
/// # Errors
///
/// Returns [`ZoneError::Empty`] for an empty batch and
/// [`ZoneError::Validation`] if any record breaks a zone invariant.
#[tracing::instrument(skip_all, fields(n_records = records.len()))]
pub fn load_zones(records: &[RawZoneRecord]) -> Result<ZoneRegistry, ZoneError> {
    if records.is_empty() {
        return Err(ZoneError::Empty);
    }

    let mut c = ViolationCollector::new();
    let mut seen = BTreeSet::new();
    let mut zones = Vec::with_capacity(records.len());

    for rec in records {
        if !seen.insert(rec.id) {
            c.push(
                ZoneId(rec.id),
                ZoneRule::DuplicateId,
                "id already used by an earlier record",
            );
        }
        if let Some(zone) = validate_record(rec, &mut c) {
            zones.push(zone);
        }
    }

    if !c.is_empty() {
        debug!("zone batch rejected");
    }
    c.finish()?;

    let registry = ZoneRegistry::from_zones(zones);
    info!(
        n_zones = registry.len(),
        n_parks = registry.count_kind(ZoneKind::Park),
        n_streets = registry.count_kind(ZoneKind::Street),
        n_private = registry.count_kind(ZoneKind::Private),
        "zones loaded"
    );
    Ok(registry)
}

impl ZoneRegistry {
    fn from_zones(zones: Vec<Zone>) -> Self {
        let index = zones.iter().enumerate().map(|(i, z)| (z.id, i)).collect();
        Self { zones, index }
    }

    /// Returns all zones in input order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Looks up a zone by id.
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.index.get(&id).map(|&i| &self.zones[i])
    }

    /// Returns the number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns `true` if the registry holds no zones.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Iterates over irrigated (non-street) zones.
    pub fn irrigable(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|z| z.is_irrigable())
    }

    /// Iterates over street zones.
    pub fn streets(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|z| z.is_street())
    }

    /// Counts zones of the given kind.
    pub fn count_kind(&self, kind: ZoneKind) -> usize {
        self.zones.iter().filter(|z| z.kind == kind).count()
    }

    /// Sum of all zone areas (m²).
    pub fn total_area_m2(&self) -> f64 {
        self.zones.iter().map(|z| z.area_m2).sum()
    }

    /// Largest zone area (m²).
    pub fn max_area_m2(&self) -> f64 {
        self.zones.iter().map(|z| z.area_m2).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RawZoneRecord> {
        vec![
            RawZoneRecord::park(1, 2000.0).with_spring(true),
            RawZoneRecord::private(2, 300.0),
            RawZoneRecord::street(3, 500.0, 5.0),
        ]
    }

    #[test]
    fn loads_valid_batch() {
        let reg = load_zones(&sample()).unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.irrigable().count(), 2);
        assert_eq!(reg.streets().count(), 1);
        assert_eq!(reg.get(ZoneId(2)).unwrap().kind(), ZoneKind::Private);
        assert!(reg.get(ZoneId(99)).is_none());
    }

    #[test]
    fn areas() {
        let reg = load_zones(&sample()).unwrap();
        assert_eq!(reg.total_area_m2(), 2800.0);
        assert_eq!(reg.max_area_m2(), 2000.0);
    }

    #[test]
    fn empty_batch() {
        assert_eq!(load_zones(&[]).unwrap_err(), ZoneError::Empty);
    }

    #[test]
    fn duplicate_ids_reported() {
        let mut recs = sample();
        recs.push(RawZoneRecord::park(1, 10.0));
        match load_zones(&recs).unwrap_err() {
            ZoneError::Validation { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].rule(), ZoneRule::DuplicateId);
                assert_eq!(violations[0].zone(), ZoneId(1));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
