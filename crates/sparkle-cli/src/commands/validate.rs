//! Scene validation command

use anyhow::{bail, Context, Result};
use sparkle_stage::open_stage;
use sparkle_validate::{Severity, Validator, ValidatorConfig};
use std::io::Write;
use std::path::PathBuf;

pub struct ValidateArgs {
    pub scene: PathBuf,
    pub report: Option<PathBuf>,
    pub errors_only: bool,
    pub parallel: bool,
}

/// Validate one scene file. Returns `Ok(false)` when any error-level issue was found.
pub fn run(args: &ValidateArgs, config: &ValidatorConfig, out: &mut impl Write) -> Result<bool> {
    if !args.scene.exists() {
        bail!("File not found: {}", args.scene.display());
    }

    let stage = open_stage(&args.scene)
        .with_context(|| format!("Failed to open scene: {}", args.scene.display()))?;

    let mut validator = Validator::from_config(config);
    if args.parallel {
        validator.validate_parallel(&stage);
    } else {
        validator.validate(&stage);
    }

    writeln!(out, "{}", validator.summary())?;

    let filter = args.errors_only.then_some(Severity::Error);
    for issue in validator.issues(filter) {
        writeln!(out, "{}", issue)?;
    }

    if let Some(path) = &args.report {
        validator
            .report()
            .write(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        writeln!(out, "Detailed report written to: {}", path.display())?;
    }

    Ok(!validator.has_errors())
}
