//! Validated zone types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a water management unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of management unit. Exactly one applies to each zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Public park or garden.
    Park,
    /// Street segment, washed rather than irrigated.
    Street,
    /// Private green area.
    Private,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ZoneKind::Park => "park",
            ZoneKind::Street => "street",
            ZoneKind::Private => "private",
        };
        f.write_str(s)
    }
}

/// Vegetation class of a zone; streets carry [`VegetationClass::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VegetationClass {
    /// No vegetation (street zones).
    None,
    /// Lawn.
    Turf,
    /// Shrubs.
    Shrub,
    /// Mixed planting.
    Mixed,
}

impl VegetationClass {
    /// The irrigated vegetation classes, in code order.
    pub const IRRIGATED: [VegetationClass; 3] = [
        VegetationClass::Turf,
        VegetationClass::Shrub,
        VegetationClass::Mixed,
    ];

    /// Parses the numeric class code (0..=3).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(VegetationClass::None),
            1 => Some(VegetationClass::Turf),
            2 => Some(VegetationClass::Shrub),
            3 => Some(VegetationClass::Mixed),
            _ => None,
        }
    }

    /// Returns the numeric class code.
    pub fn code(self) -> u8 {
        match self {
            VegetationClass::None => 0,
            VegetationClass::Turf => 1,
            VegetationClass::Shrub => 2,
            VegetationClass::Mixed => 3,
        }
    }
}

/// A validated water management unit.
///
/// Invariants (checked by [`crate::load_zones`]): a street zone has
/// vegetation class `None` and a positive wash volume; any other zone has an
/// irrigated vegetation class and zero wash volume; area is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub(crate) id: ZoneId,
    pub(crate) kind: ZoneKind,
    pub(crate) has_spring: bool,
    pub(crate) has_grey_infra: bool,
    pub(crate) vegetation: VegetationClass,
    pub(crate) area_m2: f64,
    pub(crate) wash_volume_m3: f64,
}

impl Zone {
    /// Returns the zone id.
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Returns the zone kind.
    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    /// Whether this is a street zone.
    pub fn is_street(&self) -> bool {
        self.kind == ZoneKind::Street
    }

    /// Whether this is a park zone.
    pub fn is_park(&self) -> bool {
        self.kind == ZoneKind::Park
    }

    /// Whether this is a private zone.
    pub fn is_private(&self) -> bool {
        self.kind == ZoneKind::Private
    }

    /// Whether the zone is irrigated (every non-street zone).
    pub fn is_irrigable(&self) -> bool {
        !self.is_street()
    }

    /// Whether the zone has a continuous-pressure spring source.
    pub fn has_spring(&self) -> bool {
        self.has_spring
    }

    /// Whether the zone is connected to the reclaimed water network.
    pub fn has_grey_infra(&self) -> bool {
        self.has_grey_infra
    }

    /// Returns the vegetation class.
    pub fn vegetation(&self) -> VegetationClass {
        self.vegetation
    }

    /// Returns the area in square metres.
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Returns the volume needed per wash event (m³); zero off-street.
    pub fn wash_volume_m3(&self) -> f64 {
        self.wash_volume_m3
    }
}
