//! Config command implementation.

use anyhow::Result;

use super::Context;

/// Prints the effective configuration.
pub fn execute(ctx: &Context) -> Result<()> {
    print!("{}", ctx.config.to_toml_string()?);
    Ok(())
}
