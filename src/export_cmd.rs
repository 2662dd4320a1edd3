//! Export command: write the model in CPLEX LP format.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use ugaplan_model::write_lp;

use crate::cli::ExportArgs;
use crate::scenario::Scenario;

/// Build a scenario's model and write it as LP text.
pub fn run(args: ExportArgs) -> Result<()> {
    let _cmd = info_span!("export").entered();
    let scenario = Scenario::load(&args.config, args.horizon)?;
    let model = scenario.build()?;
    std::fs::write(&args.output, write_lp(&model))
        .with_context(|| format!("failed to write LP file: {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        n_variables = model.n_variables(),
        n_constraints = model.constraints().len(),
        "model exported"
    );
    Ok(())
}
