//! Synthetic zone inventories for demos and tests.

use rand::Rng;
use tracing::debug;

use crate::error::ZoneError;
use crate::record::RawZoneRecord;

/// Parameters for [`generate_synthetic_zones`].
///
/// Defaults follow a typical mid-size municipal inventory: mostly parks,
/// a quarter private gardens, the rest street segments.
///
/// # Example
///
/// ```
/// use ugaplan_zones::SyntheticZoneConfig;
///
/// let config = SyntheticZoneConfig::new(40).with_street_weight(0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticZoneConfig {
    n_zones: usize,
    park_weight: f64,
    street_weight: f64,
    private_weight: f64,
    spring_probability: f64,
    private_spring_probability: f64,
    park_grey_probability: f64,
    private_grey_probability: f64,
    park_area: (f64, f64),
    private_area: (f64, f64),
    street_area: (f64, f64),
    wash_volume_m3: f64,
}

impl SyntheticZoneConfig {
    /// Creates a configuration for `n_zones` zones with default proportions.
    pub fn new(n_zones: usize) -> Self {
        Self {
            n_zones,
            park_weight: 0.60,
            street_weight: 0.15,
            private_weight: 0.25,
            spring_probability: 0.6,
            private_spring_probability: 0.1,
            park_grey_probability: 0.5,
            private_grey_probability: 0.05,
            park_area: (500.0, 5000.0),
            private_area: (150.0, 800.0),
            street_area: (200.0, 1000.0),
            wash_volume_m3: 5.0,
        }
    }

    /// Sets the relative weight of park zones.
    pub fn with_park_weight(mut self, w: f64) -> Self {
        self.park_weight = w;
        self
    }

    /// Sets the relative weight of street zones.
    pub fn with_street_weight(mut self, w: f64) -> Self {
        self.street_weight = w;
        self
    }

    /// Sets the relative weight of private zones.
    pub fn with_private_weight(mut self, w: f64) -> Self {
        self.private_weight = w;
        self
    }

    /// Sets the spring probability for parks and streets.
    pub fn with_spring_probability(mut self, p: f64) -> Self {
        self.spring_probability = p;
        self
    }

    /// Sets the wash volume assigned to street zones.
    pub fn with_wash_volume_m3(mut self, v: f64) -> Self {
        self.wash_volume_m3 = v;
        self
    }

    /// Returns the number of zones to generate.
    pub fn n_zones(&self) -> usize {
        self.n_zones
    }

    /// Returns the wash volume assigned to street zones.
    pub fn wash_volume_m3(&self) -> f64 {
        self.wash_volume_m3
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::InvalidSyntheticConfig`] if the count is zero,
    /// a weight is negative or all weights are zero, a probability is
    /// outside `[0, 1]`, an area range is empty or non-positive, or the
    /// wash volume is not positive.
    pub fn validate(&self) -> Result<(), ZoneError> {
        let invalid = |reason: String| Err(ZoneError::InvalidSyntheticConfig { reason });

        if self.n_zones == 0 {
            return invalid("n_zones must be positive".to_string());
        }

        let weights = [
            ("park_weight", self.park_weight),
            ("street_weight", self.street_weight),
            ("private_weight", self.private_weight),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return invalid(format!("{name} must be finite and >= 0, got {w}"));
            }
        }
        if weights.iter().map(|(_, w)| w).sum::<f64>() <= 0.0 {
            return invalid("at least one kind weight must be positive".to_string());
        }

        for (name, p) in [
            ("spring_probability", self.spring_probability),
            ("private_spring_probability", self.private_spring_probability),
            ("park_grey_probability", self.park_grey_probability),
            ("private_grey_probability", self.private_grey_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be in [0, 1], got {p}"));
            }
        }

        for (name, (lo, hi)) in [
            ("park_area", self.park_area),
            ("private_area", self.private_area),
            ("street_area", self.street_area),
        ] {
            if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || hi < lo {
                return invalid(format!(
                    "{name} must satisfy 0 < min <= max, got ({lo}, {hi})"
                ));
            }
        }

        if !self.wash_volume_m3.is_finite() || self.wash_volume_m3 <= 0.0 {
            return invalid(format!(
                "wash_volume_m3 must be positive, got {}",
                self.wash_volume_m3
            ));
        }
        Ok(())
    }
}

enum Draw {
    Park,
    Street,
    Private,
}

/// Generates `config.n_zones()` raw records with ids `1..=n`.
///
/// Every generated record passes [`crate::load_zones`].
///
/// # Errors
///
/// Returns [`ZoneError::InvalidSyntheticConfig`] if the configuration does
/// not validate.
pub fn generate_synthetic_zones(
    config: &SyntheticZoneConfig,
    rng: &mut impl Rng,
) -> Result<Vec<RawZoneRecord>, ZoneError> {
    config.validate()?;

    let total = config.park_weight + config.street_weight + config.private_weight;
    let p_park = config.park_weight / total;
    let p_street = config.street_weight / total;

    let records: Vec<RawZoneRecord> = (1..=config.n_zones as u32)
        .map(|id| {
            let u: f64 = rng.random();
            let kind = if u < p_park {
                Draw::Park
            } else if u < p_park + p_street {
                Draw::Street
            } else {
                Draw::Private
            };

            match kind {
                Draw::Park => {
                    let area = uniform(rng, config.park_area);
                    RawZoneRecord::park(id, area)
                        .with_spring(rng.random_bool(config.spring_probability))
                        .with_grey_infra(rng.random_bool(config.park_grey_probability))
                        .with_vegetation_class(rng.random_range(1..=3))
                }
                Draw::Private => {
                    let area = uniform(rng, config.private_area);
                    RawZoneRecord::private(id, area)
                        .with_spring(rng.random_bool(config.private_spring_probability))
                        .with_grey_infra(rng.random_bool(config.private_grey_probability))
                        .with_vegetation_class(rng.random_range(1..=3))
                }
                Draw::Street => {
                    let area = uniform(rng, config.street_area);
                    RawZoneRecord::street(id, area, config.wash_volume_m3)
                        .with_spring(rng.random_bool(config.spring_probability))
                }
            }
        })
        .collect();

    debug!(n = records.len(), "generated synthetic zones");
    Ok(records)
}

fn uniform(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_config_is_valid() {
        assert!(SyntheticZoneConfig::new(10).validate().is_ok());
    }

    #[test]
    fn zero_zones_rejected() {
        assert!(matches!(
            SyntheticZoneConfig::new(0).validate(),
            Err(ZoneError::InvalidSyntheticConfig { .. })
        ));
    }

    #[test]
    fn negative_weight_rejected() {
        let cfg = SyntheticZoneConfig::new(5).with_park_weight(-1.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn all_zero_weights_rejected() {
        let cfg = SyntheticZoneConfig::new(5)
            .with_park_weight(0.0)
            .with_street_weight(0.0)
            .with_private_weight(0.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_probability_rejected() {
        let cfg = SyntheticZoneConfig::new(5).with_spring_probability(1.5);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(7);
        let recs = generate_synthetic_zones(&SyntheticZoneConfig::new(12), &mut rng).unwrap();
        let ids: Vec<u32> = recs.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn streets_only() {
        let cfg = SyntheticZoneConfig::new(8)
            .with_park_weight(0.0)
            .with_private_weight(0.0)
            .with_wash_volume_m3(4.0);
        let mut rng = StdRng::seed_from_u64(1);
        let recs = generate_synthetic_zones(&cfg, &mut rng).unwrap();
        for r in &recs {
            assert!(r.street);
            assert_eq!(r.vegetation_class, 0);
            assert_eq!(r.wash_volume_m3, Some(4.0));
            assert!((200.0..1000.0).contains(&r.area_m2));
        }
    }
}
