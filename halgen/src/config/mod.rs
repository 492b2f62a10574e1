//! Configuration management for halgen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Command-line flags (highest priority, applied by the CLI)
//! 2. Environment variables (`HALGEN_` prefix, `__` separates sections)
//! 3. `./halgen.toml` (project)
//! 4. `~/.config/halgen/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # halgen.toml
//! flavor = "qt"
//! accessor_style = "method"
//! property_type = "int"
//! strict = true
//! template_dir = "./templates"
//!
//! [service]
//! port = 6000
//! host = "0.0.0.0"
//! window_title = "Stage service"
//! ```
//!
//! The same settings from the environment:
//!
//! ```text
//! HALGEN_FLAVOR=qt HALGEN_SERVICE__PORT=6000 halgen proxy --from stage.toml
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::proxy::DEFAULT_PROPERTY_TYPE;

/// Project-local configuration file
pub const PROJECT_CONFIG_FILE: &str = "halgen.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HALGEN_";

/// Output flavor of the proxy generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Plain property-based proxy class (default)
    #[default]
    Plain,
    /// `QObject` proxy with one change signal per property
    Qt,
    /// Standalone JSON-RPC service script
    Service,
}

impl Flavor {
    /// Every flavor, in registration order
    pub const ALL: [Self; 3] = [Self::Plain, Self::Qt, Self::Service];

    /// Template name of the flavor
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Qt => "qt",
            Self::Service => "service",
        }
    }
}

/// How the plain proxy exposes properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccessorStyle {
    /// `@property` / `@x.setter` decorators (default)
    #[default]
    Property,
    /// Explicit `get_x` / `set_x` methods
    Method,
}

/// Structured format of the spec dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,
    /// TOML
    Toml,
}

/// Settings of the generated RPC service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Default `--service-port` of the generated script
    pub port: u16,

    /// Default `--service-ip` of the generated script
    pub host: String,

    /// Suffix appended to the template class name
    pub class_suffix: String,

    /// Console window title set on startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            port: 5070,
            host: "127.0.0.1".to_string(),
            class_suffix: "Service".to_string(),
            window_title: None,
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Template used by `proxy`
    pub flavor: Flavor,

    /// Accessor style of the plain proxy
    pub accessor_style: AccessorStyle,

    /// Placeholder type for every property
    pub property_type: String,

    /// Suffix appended to the template class name for proxy flavors
    pub proxy_suffix: String,

    /// Format of the spec dump
    pub dump_format: DumpFormat,

    /// Treat naming diagnostics as errors
    pub strict: bool,

    /// Directory with `<flavor>.py.hbs` template overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Service wrapper settings
    pub service: ServiceSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            flavor: Flavor::default(),
            accessor_style: AccessorStyle::default(),
            property_type: DEFAULT_PROPERTY_TYPE.to_string(),
            proxy_suffix: "Proxy".to_string(),
            dump_format: DumpFormat::default(),
            strict: false,
            template_dir: None,
            service: ServiceSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from the standard locations
    ///
    /// Searches with precedence:
    /// 1. Environment variables (`HALGEN_*`)
    /// 2. `./halgen.toml`
    /// 3. `~/.config/halgen/config.toml`
    /// 4. Defaults
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use halgen::GeneratorConfig;
    ///
    /// # fn example() -> halgen::Result<()> {
    /// let config = GeneratorConfig::load()?;
    /// println!("default flavor: {:?}", config.flavor);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is malformed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self> {
        Self::figment(None).extract().map_err(Into::into)
    }

    /// Load configuration with an explicit file in place of `./halgen.toml`
    ///
    /// The user config and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be extracted.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::figment(Some(path)).extract().map_err(Into::into)
    }

    /// Provider chain used by [`load`](Self::load)
    #[must_use]
    pub fn figment(project_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_file) = Self::recommended_path() {
            figment = figment.merge(Toml::file(user_file));
        }

        let project_file = project_file.map_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE), Path::to_path_buf);

        figment
            .merge(Toml::file(project_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the XDG config path for the user configuration
    ///
    /// Uses `$XDG_CONFIG_HOME` when set, otherwise the platform config
    /// directory (`~/.config` on Linux). Returns `None` when neither can be
    /// determined.
    #[must_use]
    pub fn recommended_path() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .map(|dir| dir.join("halgen").join("config.toml"))
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generated class name for a template class and flavor
    ///
    /// ```
    /// # use halgen::{Flavor, GeneratorConfig};
    /// let config = GeneratorConfig::default();
    /// assert_eq!(config.class_name_for("Stage", Flavor::Plain), "StageProxy");
    /// assert_eq!(config.class_name_for("Stage", Flavor::Service), "StageService");
    /// ```
    #[must_use]
    pub fn class_name_for(&self, template_class: &str, flavor: Flavor) -> String {
        let suffix = match flavor {
            Flavor::Plain | Flavor::Qt => &self.proxy_suffix,
            Flavor::Service => &self.service.class_suffix,
        };
        format!("{template_class}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    /// Point the user config directory into the jail
    fn isolate(jail: &mut Jail) {
        let dir = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", dir.display());
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.flavor, Flavor::Plain);
        assert_eq!(config.accessor_style, AccessorStyle::Property);
        assert_eq!(config.property_type, "float");
        assert_eq!(config.proxy_suffix, "Proxy");
        assert!(!config.strict);
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_service_defaults() {
        let service = ServiceSettings::default();
        assert_eq!(service.port, 5070);
        assert_eq!(service.host, "127.0.0.1");
        assert_eq!(service.class_suffix, "Service");
        assert!(service.window_title.is_none());
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
                flavor = "qt"
                property_type = "int"

                [service]
                port = 6000
                "#,
            )?;

            let config: GeneratorConfig = GeneratorConfig::figment(None).extract()?;
            assert_eq!(config.flavor, Flavor::Qt);
            assert_eq!(config.property_type, "int");
            assert_eq!(config.service.port, 6000);
            assert_eq!(config.service.host, "127.0.0.1");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(PROJECT_CONFIG_FILE, "flavor = \"qt\"\nstrict = false")?;
            jail.set_env("HALGEN_FLAVOR", "service");
            jail.set_env("HALGEN_STRICT", "true");
            jail.set_env("HALGEN_SERVICE__HOST", "0.0.0.0");

            let config: GeneratorConfig = GeneratorConfig::figment(None).extract()?;
            assert_eq!(config.flavor, Flavor::Service);
            assert!(config.strict);
            assert_eq!(config.service.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("custom.toml", "accessor_style = \"method\"")?;

            let config: GeneratorConfig =
                GeneratorConfig::figment(Some(Path::new("custom.toml"))).extract()?;
            assert_eq!(config.accessor_style, AccessorStyle::Method);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(PROJECT_CONFIG_FILE, "flavor = \"gtk\"")?;

            let result: figment::error::Result<GeneratorConfig> =
                GeneratorConfig::figment(None).extract();
            assert!(result.is_err());
            Ok(())
        });
    }

    #[test]
    fn test_layer_precedence() {
        Jail::expect_with(|jail| {
            isolate(jail);
            std::fs::create_dir_all(jail.directory().join("halgen")).map_err(|e| e.to_string())?;
            jail.create_file(
                "halgen/config.toml",
                r#"
                property_type = "int"
                proxy_suffix = "Remote"

                [service]
                host = "10.0.0.1"
                port = 7777
                "#,
            )?;
            jail.create_file(PROJECT_CONFIG_FILE, "proxy_suffix = \"Client\"\n\n[service]\nport = 6000")?;
            jail.set_env("HALGEN_SERVICE__PORT", "6500");

            let config: GeneratorConfig = GeneratorConfig::figment(None).extract()?;
            // user file over defaults
            assert_eq!(config.property_type, "int");
            assert_eq!(config.service.host, "10.0.0.1");
            // project file over user file
            assert_eq!(config.proxy_suffix, "Client");
            // environment over both
            assert_eq!(config.service.port, 6500);
            assert_eq!(config.flavor, Flavor::Plain);
            Ok(())
        });
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = GeneratorConfig {
            flavor: Flavor::Service,
            ..GeneratorConfig::default()
        };
        let rendered = config.to_toml().unwrap();

        assert!(rendered.contains("flavor = \"service\""));
        assert!(rendered.contains("[service]"));
        let parsed: GeneratorConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
