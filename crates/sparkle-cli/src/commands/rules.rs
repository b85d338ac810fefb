//! Rule listing command

use anyhow::Result;
use sparkle_validate::{RuleSet, ValidatorConfig};
use std::io::Write;

pub fn run(config: &ValidatorConfig, out: &mut impl Write) -> Result<()> {
    let rules = RuleSet::from_config(config);
    if rules.is_empty() {
        writeln!(out, "All rules are disabled.")?;
        return Ok(());
    }

    let width = rules.ids().iter().map(|id| id.len()).max().unwrap_or(0);
    for rule in rules.all() {
        writeln!(out, "{:<width$}  {}", rule.id(), rule.description(), width = width)?;
    }

    if !config.rules.disabled.is_empty() {
        writeln!(out, "\nDisabled: {}", config.rules.disabled.join(", "))?;
    }

    Ok(())
}
