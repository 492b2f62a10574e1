//! Proxy generation command
//!
//! Renders one of the proxy flavors for a template class, either to stdout or
//! as a file in an output directory.
//!
//! # Example
//!
//! ```bash
//! halgen proxy Stage __init__ getValue 'setValue(v)' reset --flavor service -o services/
//! ```

use super::ClassInput;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use halgen::{AccessorStyle, Flavor, GeneratedFile, GeneratorConfig, ProxyGenerator};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generate a proxy class or service wrapper
#[derive(Debug, Args)]
pub struct ProxyCommand {
    #[command(flatten)]
    input: ClassInput,

    /// Output flavor (default from configuration: plain)
    #[arg(long, value_enum)]
    flavor: Option<Flavor>,

    /// Accessor style of the plain proxy
    #[arg(long, value_enum)]
    accessor: Option<AccessorStyle>,

    /// Placeholder type for every property
    #[arg(long, value_name = "TYPE")]
    property_type: Option<String>,

    /// Default port of the generated service
    #[arg(long, value_name = "PORT")]
    service_port: Option<u16>,

    /// Default host of the generated service
    #[arg(long, value_name = "HOST")]
    service_host: Option<String>,

    /// Console title set by the generated service
    #[arg(long, value_name = "TITLE")]
    window_title: Option<String>,

    /// Directory with `<flavor>.py.hbs` template overrides
    #[arg(long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Fail on ambiguous or colliding member names
    #[arg(long)]
    strict: bool,

    /// Write `<class>.py` into this directory instead of stdout
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

impl ProxyCommand {
    /// Execute the proxy command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the class definition is invalid or has no constructor
    /// - rendering fails
    /// - the output file cannot be written
    pub fn execute(&self, config: GeneratorConfig, out: &mut impl Write) -> Result<()> {
        let config = self.apply(config);
        let definition = self.input.definition()?;
        let flavor = config.flavor;

        let generator = ProxyGenerator::new(&definition, config)
            .context("Failed to create proxy generator")?;

        match &self.output {
            None => {
                let source = generator.render(flavor).context("Failed to render proxy")?;
                out.write_all(source.as_bytes())?;
            }
            Some(dir) => {
                let file = generator.generate(flavor).context("Failed to render proxy")?;
                let path = write_file(dir, &file)?;
                writeln!(
                    out,
                    "  {} {} ({})",
                    style("✓").green(),
                    style(path.display()).dim(),
                    style(&file.description).dim()
                )?;
            }
        }

        Ok(())
    }

    /// Layer command-line flags over the loaded configuration
    fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(flavor) = self.flavor {
            config.flavor = flavor;
        }
        if let Some(accessor) = self.accessor {
            config.accessor_style = accessor;
        }
        if let Some(property_type) = &self.property_type {
            config.property_type.clone_from(property_type);
        }
        if let Some(port) = self.service_port {
            config.service.port = port;
        }
        if let Some(host) = &self.service_host {
            config.service.host.clone_from(host);
        }
        if let Some(title) = &self.window_title {
            config.service.window_title = Some(title.clone());
        }
        if let Some(dir) = &self.template_dir {
            config.template_dir = Some(dir.clone());
        }
        config.strict |= self.strict;
        config
    }
}

/// Write a generated file below `dir`, creating directories as needed
fn write_file(dir: &Path, file: &GeneratedFile) -> Result<PathBuf> {
    let full_path = dir.join(&file.path);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(&full_path, &file.content)
        .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

    tracing::debug!(path = %full_path.display(), "wrote generated file");
    Ok(full_path)
}
