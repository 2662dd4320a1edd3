//! Raw zone records as supplied by an external zone data source.

use serde::{Deserialize, Serialize};

/// One unvalidated zone record.
///
/// The three kind flags mirror municipal inventory exports, where each
/// unit is tagged independently; [`crate::load_zones`] checks that exactly
/// one is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawZoneRecord {
    /// Unique zone id.
    pub id: u32,
    /// Street segment flag.
    #[serde(default)]
    pub street: bool,
    /// Park flag.
    #[serde(default)]
    pub park: bool,
    /// Private area flag.
    #[serde(default)]
    pub private: bool,
    /// Spring (continuous-pressure) source available.
    #[serde(default)]
    pub has_spring: bool,
    /// Connected to the reclaimed water network.
    #[serde(default)]
    pub has_grey_infra: bool,
    /// Vegetation class code: 0 none, 1 turf, 2 shrub, 3 mixed.
    #[serde(default)]
    pub vegetation_class: u8,
    /// Surface in square metres.
    pub area_m2: f64,
    /// Volume per wash event in cubic metres (street zones only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wash_volume_m3: Option<f64>,
}

impl RawZoneRecord {
    /// A park record with turf vegetation and no optional sources.
    pub fn park(id: u32, area_m2: f64) -> Self {
        Self {
            id,
            street: false,
            park: true,
            private: false,
            has_spring: false,
            has_grey_infra: false,
            vegetation_class: 1,
            area_m2,
            wash_volume_m3: None,
        }
    }

    /// A private record with turf vegetation and no optional sources.
    pub fn private(id: u32, area_m2: f64) -> Self {
        Self {
            park: false,
            private: true,
            ..Self::park(id, area_m2)
        }
    }

    /// A street record with the given wash volume per event.
    pub fn street(id: u32, area_m2: f64, wash_volume_m3: f64) -> Self {
        Self {
            id,
            street: true,
            park: false,
            private: false,
            has_spring: false,
            has_grey_infra: false,
            vegetation_class: 0,
            area_m2,
            wash_volume_m3: Some(wash_volume_m3),
        }
    }

    /// Sets the spring flag.
    pub fn with_spring(mut self, has_spring: bool) -> Self {
        self.has_spring = has_spring;
        self
    }

    /// Sets the grey-infrastructure flag.
    pub fn with_grey_infra(mut self, has_grey_infra: bool) -> Self {
        self.has_grey_infra = has_grey_infra;
        self
    }

    /// Sets the vegetation class code.
    pub fn with_vegetation_class(mut self, code: u8) -> Self {
        self.vegetation_class = code;
        self
    }
}
