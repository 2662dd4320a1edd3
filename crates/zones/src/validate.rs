//! Accumulated zone validation.
//!
//! Provides [`ViolationCollector`] for gathering every invariant violation
//! in a batch of raw records into a single [`ZoneError::Validation`], plus
//! the per-record checks.

use std::fmt;

use crate::error::ZoneError;
use crate::record::RawZoneRecord;
use crate::zone::{VegetationClass, Zone, ZoneId, ZoneKind};

/// The zone invariant a record violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneRule {
    /// None of the kind flags is set.
    NoKind,
    /// More than one kind flag is set.
    MultipleKinds,
    /// Vegetation class code outside 0..=3.
    UnknownVegetationClass,
    /// Street zone with a vegetation class other than none.
    StreetVegetation,
    /// Non-street zone without an irrigated vegetation class.
    MissingVegetation,
    /// Street zone without a positive wash volume.
    StreetWashVolume,
    /// Non-street zone with a nonzero wash volume.
    NonStreetWashVolume,
    /// Area not finite and positive.
    NonPositiveArea,
    /// Zone id used by more than one record.
    DuplicateId,
}

impl fmt::Display for ZoneRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ZoneRule::NoKind => "no kind",
            ZoneRule::MultipleKinds => "multiple kinds",
            ZoneRule::UnknownVegetationClass => "unknown vegetation class",
            ZoneRule::StreetVegetation => "street vegetation",
            ZoneRule::MissingVegetation => "missing vegetation",
            ZoneRule::StreetWashVolume => "street wash volume",
            ZoneRule::NonStreetWashVolume => "non-street wash volume",
            ZoneRule::NonPositiveArea => "non-positive area",
            ZoneRule::DuplicateId => "duplicate id",
        };
        f.write_str(s)
    }
}

/// One violated invariant on one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneViolation {
    zone: ZoneId,
    rule: ZoneRule,
    detail: String,
}

impl ZoneViolation {
    /// Creates a violation record.
    pub fn new(zone: ZoneId, rule: ZoneRule, detail: impl Into<String>) -> Self {
        Self {
            zone,
            rule,
            detail: detail.into(),
        }
    }

    /// Returns the offending zone id.
    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Returns the violated rule.
    pub fn rule(&self) -> ZoneRule {
        self.rule
    }

    /// Returns the human-readable detail.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for ZoneViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}: {}: {}", self.zone, self.rule, self.detail)
    }
}

/// Accumulates violations and converts them into a single
/// [`ZoneError::Validation`].
pub(crate) struct ViolationCollector {
    violations: Vec<ZoneViolation>,
}

impl ViolationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Record one violation.
    pub(crate) fn push(&mut self, zone: ZoneId, rule: ZoneRule, detail: impl Into<String>) {
        self.violations.push(ZoneViolation::new(zone, rule, detail));
    }

    /// Returns `true` when no violations have been recorded.
    pub(crate) fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consume the collector and return `Ok(())` if nothing was recorded,
    /// or a single `Err(ZoneError::Validation)` listing every violation.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), ZoneError> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let details = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ZoneError::Validation {
            count: self.violations.len(),
            details,
            violations: self.violations,
        })
    }
}

/// Checks one record against the zone invariants.
///
/// Returns the validated zone when the record is clean; otherwise records
/// every violation into `c` and returns `None`.
pub(crate) fn validate_record(rec: &RawZoneRecord, c: &mut ViolationCollector) -> Option<Zone> {
    let id = ZoneId(rec.id);
    let before = c.violations.len();

    let kinds: Vec<ZoneKind> = [
        (rec.park, ZoneKind::Park),
        (rec.street, ZoneKind::Street),
        (rec.private, ZoneKind::Private),
    ]
    .into_iter()
    .filter_map(|(set, kind)| set.then_some(kind))
    .collect();

    let kind = match kinds.as_slice() {
        [kind] => Some(*kind),
        [] => {
            c.push(id, ZoneRule::NoKind, "no kind flag set");
            None
        }
        many => {
            let names: Vec<String> = many.iter().map(ToString::to_string).collect();
            c.push(
                id,
                ZoneRule::MultipleKinds,
                format!("flags set: {}", names.join(", ")),
            );
            None
        }
    };

    let vegetation = VegetationClass::from_code(rec.vegetation_class);
    if vegetation.is_none() {
        c.push(
            id,
            ZoneRule::UnknownVegetationClass,
            format!("code {} (must be 0..=3)", rec.vegetation_class),
        );
    }

    if !rec.area_m2.is_finite() || rec.area_m2 <= 0.0 {
        c.push(
            id,
            ZoneRule::NonPositiveArea,
            format!("area {} m² (must be finite and > 0)", rec.area_m2),
        );
    }

    match kind {
        Some(ZoneKind::Street) => {
            if let Some(v) = vegetation.filter(|v| *v != VegetationClass::None) {
                c.push(
                    id,
                    ZoneRule::StreetVegetation,
                    format!("vegetation class {} (must be 0)", v.code()),
                );
            }
            match rec.wash_volume_m3 {
                Some(v) if v.is_finite() && v > 0.0 => {}
                Some(v) => c.push(
                    id,
                    ZoneRule::StreetWashVolume,
                    format!("wash volume {v} m³ (must be > 0)"),
                ),
                None => c.push(id, ZoneRule::StreetWashVolume, "wash volume unset"),
            }
        }
        Some(_) => {
            if vegetation == Some(VegetationClass::None) {
                c.push(
                    id,
                    ZoneRule::MissingVegetation,
                    "vegetation class 0 on an irrigated zone",
                );
            }
            if let Some(v) = rec.wash_volume_m3.filter(|&v| v != 0.0) {
                c.push(
                    id,
                    ZoneRule::NonStreetWashVolume,
                    format!("wash volume {v} m³ (must be 0)"),
                );
            }
        }
        None => {}
    }

    if c.violations.len() > before {
        return None;
    }
    // kind and vegetation are Some when no violation was recorded
    Some(Zone {
        id,
        kind: kind?,
        has_spring: rec.has_spring,
        has_grey_infra: rec.has_grey_infra,
        vegetation: vegetation?,
        area_m2: rec.area_m2,
        wash_volume_m3: rec.wash_volume_m3.unwrap_or(0.0),
    })
}
