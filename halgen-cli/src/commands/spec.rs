//! Spec dump command

use super::ClassInput;
use anyhow::{Context, Result};
use clap::Args;
use halgen::{DumpFormat, GeneratorConfig, ProxyGenerator};
use std::io::Write;

/// Print the property and method descriptors of a class
#[derive(Debug, Args)]
pub struct SpecCommand {
    #[command(flatten)]
    input: ClassInput,

    /// Output format (default from configuration: json)
    #[arg(long, value_enum)]
    format: Option<DumpFormat>,

    /// Placeholder type for every property
    #[arg(long, value_name = "TYPE")]
    property_type: Option<String>,

    /// Fail on ambiguous or colliding member names
    #[arg(long)]
    strict: bool,
}

impl SpecCommand {
    /// Execute the spec command
    ///
    /// # Errors
    ///
    /// Returns an error if the class definition is invalid, has no
    /// constructor, or fails a strict check.
    pub fn execute(&self, mut config: GeneratorConfig, out: &mut impl Write) -> Result<()> {
        if let Some(property_type) = &self.property_type {
            config.property_type.clone_from(property_type);
        }
        config.strict |= self.strict;
        let format = self.format.unwrap_or(config.dump_format);

        let definition = self.input.definition()?;
        let generator = ProxyGenerator::new(&definition, config)
            .context("Failed to build class spec")?;

        let dump = generator.dump(format).context("Failed to serialize class spec")?;
        out.write_all(dump.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(members: &[&str], format: Option<DumpFormat>) -> SpecCommand {
        SpecCommand {
            input: ClassInput {
                name: Some("Stage".to_string()),
                members: members.iter().map(ToString::to_string).collect(),
                from: None,
            },
            format,
            property_type: None,
            strict: false,
        }
    }

    #[test]
    fn test_json_dump() {
        let cmd = command(&["__init__", "getValue", "setValue(v)", "reset"], None);
        let mut out = Vec::new();

        cmd.execute(GeneratorConfig::default(), &mut out).unwrap();

        let dump: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(dump["className"], "Stage");
        assert_eq!(dump["propertySpecs"][0]["propertyName"], "value");
        assert_eq!(dump["propertySpecs"][0]["getter"]["name"], "getValue");
        assert_eq!(dump["methodSpecs"][0]["name"], "reset");
    }

    #[test]
    fn test_format_from_config() {
        let cmd = command(&["__init__", "getValue"], None);
        let config = GeneratorConfig {
            dump_format: DumpFormat::Toml,
            ..GeneratorConfig::default()
        };
        let mut out = Vec::new();

        cmd.execute(config, &mut out).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("className = \"Stage\""));
    }

    #[test]
    fn test_property_type_flag() {
        let mut cmd = command(&["__init__", "getPower"], Some(DumpFormat::Json));
        cmd.property_type = Some("int".to_string());
        let mut out = Vec::new();

        cmd.execute(GeneratorConfig::default(), &mut out).unwrap();

        let dump: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(dump["propertySpecs"][0]["propertyType"], "int");
    }

    #[test]
    fn test_strict_flag() {
        let mut cmd = command(&["__init__", "get"], None);
        cmd.strict = true;
        let mut out = Vec::new();

        assert!(cmd.execute(GeneratorConfig::default(), &mut out).is_err());
    }
}
