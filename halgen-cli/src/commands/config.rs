//! Effective configuration command

use anyhow::{Context, Result};
use halgen::config::PROJECT_CONFIG_FILE;
use halgen::GeneratorConfig;
use std::io::Write;

/// Print the effective configuration as TOML
pub struct ConfigCommand;

impl ConfigCommand {
    /// Execute the config command
    ///
    /// The output is a valid `halgen.toml`, preceded by comments naming the
    /// files it was merged from.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or the
    /// writer fails.
    pub fn execute(config: &GeneratorConfig, out: &mut impl Write) -> Result<()> {
        let rendered = config.to_toml().context("Failed to serialize configuration")?;

        if let Some(user_file) = GeneratorConfig::recommended_path() {
            writeln!(out, "# user config: {}", user_file.display())?;
        }
        writeln!(out, "# project config: ./{PROJECT_CONFIG_FILE}")?;
        writeln!(out)?;
        out.write_all(rendered.as_bytes())?;
        Ok(())
    }
}
