//! Generate-zones command: write synthetic zone records.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use ugaplan_zones::{SyntheticZoneConfig, generate_synthetic_zones};

use crate::cli::GenerateZonesArgs;
use crate::config::ZonesFile;

/// Generate `count` zones and write them as a TOML zones file.
pub fn run(args: GenerateZonesArgs) -> Result<()> {
    let _cmd = info_span!("generate_zones").entered();
    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let config = SyntheticZoneConfig::new(args.count);
    let zones = generate_synthetic_zones(&config, &mut rng)
        .context("failed to generate synthetic zones")?;
    let n = zones.len();
    let text = toml::to_string(&ZonesFile { zones }).context("failed to serialize zones")?;
    std::fs::write(&args.output, text)
        .with_context(|| format!("failed to write zones file: {}", args.output.display()))?;
    info!(path = %args.output.display(), n_zones = n, "zones written");
    Ok(())
}
