//! Proxy generator orchestrator
//!
//! Ties the pipeline together:
//! 1. Validate the class definition (a constructor is required)
//! 2. Classify public members into getters, setters and methods
//! 3. Build the class spec and report naming diagnostics
//! 4. Render a template flavor or dump the spec

use super::classifier::MemberClassifier;
use super::member::{is_identifier, ClassDefinition, TemplateClass};
use super::spec::{ClassSpec, SpecBuilder};
use super::templates::TemplateRegistry;
use super::TemplateHelpers;
use crate::config::{AccessorStyle, DumpFormat, Flavor, GeneratorConfig};
use crate::error::{HalgenError, Result};
use serde_json::json;
use std::path::PathBuf;

/// Proxy generator for one template class
pub struct ProxyGenerator {
    spec: ClassSpec,
    config: GeneratorConfig,
    templates: TemplateRegistry,
}

impl ProxyGenerator {
    /// Create a generator for `definition`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the definition declares no `__init__` constructor
    /// - `config.strict` is set and the spec has a naming diagnostic
    /// - a configured class suffix makes a generated name invalid
    /// - a template override fails to load
    #[tracing::instrument(skip_all, fields(class = %definition.name))]
    pub fn new(definition: &ClassDefinition, config: GeneratorConfig) -> Result<Self> {
        let constructor =
            definition
                .constructor()
                .ok_or_else(|| HalgenError::MissingConstructor {
                    class: definition.name.clone(),
                })?;
        tracing::debug!(args = ?constructor.args, "found constructor");

        let classification = MemberClassifier::classify(definition);
        let spec = SpecBuilder::new(config.property_type.clone()).build(definition, classification);

        for diagnostic in &spec.diagnostics {
            tracing::warn!(class = %definition.name, "{diagnostic}");
        }
        if config.strict {
            spec.ensure_clean()?;
        }

        tracing::debug!(
            properties = spec.property_specs.len(),
            methods = spec.method_specs.len(),
            "built class spec"
        );

        for flavor in Flavor::ALL {
            let class_name = config.class_name_for(&spec.class_name, flavor);
            if !is_identifier(&class_name) {
                return Err(HalgenError::InvalidClassName(class_name));
            }
        }

        let templates = TemplateRegistry::new(config.template_dir.as_deref())?;

        Ok(Self {
            spec,
            config,
            templates,
        })
    }

    /// Create a generator for a type annotated with `#[template_class]`
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn for_class<T: TemplateClass>(config: GeneratorConfig) -> Result<Self> {
        Self::new(&T::class_definition(), config)
    }

    /// The class spec
    #[must_use]
    pub const fn spec(&self) -> &ClassSpec {
        &self.spec
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Name of the class generated for `flavor`
    #[must_use]
    pub fn class_name(&self, flavor: Flavor) -> String {
        self.config.class_name_for(&self.spec.class_name, flavor)
    }

    /// Render the source text of `flavor`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, flavor: Flavor) -> Result<String> {
        let context = self.template_context(flavor);
        self.templates.render(flavor, &context)
    }

    /// Render `flavor` as a file named after the generated class
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn generate(&self, flavor: Flavor) -> Result<GeneratedFile> {
        let class_name = self.class_name(flavor);
        let content = self.render(flavor)?;

        let description = match flavor {
            Flavor::Plain => format!("Proxy for {}", self.spec.class_name),
            Flavor::Qt => format!("QObject proxy for {}", self.spec.class_name),
            Flavor::Service => format!("RPC service for {}", self.spec.class_name),
        };

        Ok(GeneratedFile {
            path: PathBuf::from(TemplateHelpers::to_file_name(&class_name)),
            content,
            description,
        })
    }

    /// Serialize the class spec with sorted keys
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn dump(&self, format: DumpFormat) -> Result<String> {
        match format {
            DumpFormat::Json => {
                // serde_json::Value keeps object keys sorted
                let value = serde_json::to_value(&self.spec)?;
                Ok(serde_json::to_string_pretty(&value)? + "\n")
            }
            DumpFormat::Toml => {
                let value = toml::Value::try_from(&self.spec)?;
                Ok(toml::to_string_pretty(&value)?)
            }
        }
    }

    /// Template variables for a flavor
    fn template_context(&self, flavor: Flavor) -> serde_json::Value {
        let use_property_syntax = matches!(self.config.accessor_style, AccessorStyle::Property);

        let properties: Vec<_> = self
            .spec
            .property_specs
            .iter()
            .map(|p| {
                json!({
                    "name": p.property_name,
                    "getter": p.getter,
                    "setter": p.setter,
                    "property_type": p.property_type,
                    "signal_name": TemplateHelpers::to_signal_name(&p.property_name),
                    // `@x.setter` needs a preceding `@property x`
                    "decorate_setter": use_property_syntax && p.getter.is_some(),
                })
            })
            .collect();

        let methods: Vec<_> = self
            .spec
            .method_specs
            .iter()
            .map(|m| {
                let signature = m.signature();
                json!({
                    "name": m.name,
                    "params": signature.params(),
                    "call_args": signature.call_args(),
                })
            })
            .collect();

        json!({
            "class_name": self.class_name(flavor),
            "template_class": self.spec.class_name,
            "use_property_syntax": use_property_syntax,
            "properties": properties,
            "methods": methods,
            "service_port": self.config.service.port,
            "service_host": TemplateHelpers::to_string_literal(&self.config.service.host),
            "window_title": self
                .config
                .service
                .window_title
                .as_deref()
                .map(TemplateHelpers::to_string_literal),
        })
    }
}

/// Represents a generated file
#[derive(Debug)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::SpecDiagnostic;

    fn generator(members: &[&str]) -> ProxyGenerator {
        let definition = ClassDefinition::parse("Stage", members).unwrap();
        ProxyGenerator::new(&definition, GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_constructor_is_fatal() {
        let definition = ClassDefinition::parse("Stage", &["getValue"]).unwrap();
        let result = ProxyGenerator::new(&definition, GeneratorConfig::default());

        assert!(matches!(
            result,
            Err(HalgenError::MissingConstructor { ref class }) if class == "Stage"
        ));
    }

    #[test]
    fn test_strict_mode_rejects_diagnostics() {
        let definition = ClassDefinition::parse("Stage", &["__init__", "get"]).unwrap();
        let config = GeneratorConfig {
            strict: true,
            ..GeneratorConfig::default()
        };

        let result = ProxyGenerator::new(&definition, config);
        assert!(matches!(
            result,
            Err(HalgenError::Strict(SpecDiagnostic::AmbiguousProperty { .. }))
        ));
    }

    #[test]
    fn test_strict_mode_rejects_duplicate_method() {
        let definition =
            ClassDefinition::parse("Stage", &["__init__", "reset", "reset(axis)"]).unwrap();
        let config = GeneratorConfig {
            strict: true,
            ..GeneratorConfig::default()
        };

        let result = ProxyGenerator::new(&definition, config);
        assert!(matches!(
            result,
            Err(HalgenError::Strict(SpecDiagnostic::DuplicateMethod { ref name, .. })) if name == "reset"
        ));
    }

    #[test]
    fn test_lenient_mode_keeps_diagnostics() {
        let generator = generator(&["__init__", "get"]);

        assert_eq!(generator.spec().diagnostics.len(), 1);
        assert!(generator.spec().property("").is_some());
    }

    #[test]
    fn test_template_context() {
        let generator = generator(&["__init__", "getValue", "setValue(v)", "move(x, y=0)"]);
        let context = generator.template_context(Flavor::Plain);

        assert_eq!(context["class_name"], "StageProxy");
        assert_eq!(context["template_class"], "Stage");
        assert_eq!(context["use_property_syntax"], true);
        assert_eq!(context["properties"][0]["name"], "value");
        assert_eq!(context["properties"][0]["signal_name"], "valueChanged");
        assert_eq!(context["properties"][0]["decorate_setter"], true);
        assert_eq!(context["methods"][0]["params"], "self, x, y=0");
        assert_eq!(context["methods"][0]["call_args"], "x, y");
    }

    #[test]
    fn test_setter_only_is_never_decorated() {
        let generator = generator(&["__init__", "setTarget(t)"]);
        let context = generator.template_context(Flavor::Plain);

        assert_eq!(context["properties"][0]["decorate_setter"], false);

        let output = generator.render(Flavor::Plain).unwrap();
        assert!(output.contains("    def set_target(self, value):"));
        assert!(!output.contains("@target.setter"));
    }

    #[test]
    fn test_method_accessor_style() {
        let definition =
            ClassDefinition::parse("Stage", &["__init__", "getValue", "setValue(v)"]).unwrap();
        let config = GeneratorConfig {
            accessor_style: AccessorStyle::Method,
            ..GeneratorConfig::default()
        };
        let output = ProxyGenerator::new(&definition, config)
            .unwrap()
            .render(Flavor::Plain)
            .unwrap();

        assert!(output.contains("    def get_value(self):\n        return self.target.getValue()"));
        assert!(output.contains("    def set_value(self, value):\n        self.target.setValue(value)"));
        assert!(!output.contains("@property"));
    }

    #[test]
    fn test_qt_render() {
        let generator = generator(&["__init__", "getValue", "setValue(v)", "home(axis)"]);
        let output = generator.render(Flavor::Qt).unwrap();

        assert!(output.contains("class StageProxy(QObject):"));
        assert!(output.contains("    valueChanged = pyqtSignal(float)"));
        assert!(output.contains("    def value(self):\n        return self.target.getValue()"));
        assert!(output.contains("        self.valueChanged.emit(value)"));
        assert!(output.contains("    def home(self, axis):\n        return self.target.home(axis)"));
    }

    #[test]
    fn test_qt_forwards_annotated_arguments() {
        let generator = generator(&["__init__", "move(x: int, y: int = 0)"]);
        let output = generator.render(Flavor::Qt).unwrap();

        assert!(output.contains(
            "    def move(self, x: int, y: int = 0):\n        return self.target.move(x, y)"
        ));
    }

    #[test]
    fn test_service_render() {
        let definition =
            ClassDefinition::parse("Stage", &["__init__", "getValue", "setValue(v)", "reset"])
                .unwrap();
        let mut config = GeneratorConfig::default();
        config.service.port = 6001;
        config.service.window_title = Some("Stage service".to_string());

        let output = ProxyGenerator::new(&definition, config)
            .unwrap()
            .render(Flavor::Service)
            .unwrap();

        assert!(output.contains("class StageService(object):"));
        assert!(output.contains("    @public\n    def get_value(self):"));
        assert!(output.contains("    @public\n    def set_value(self, value):"));
        assert!(output.contains("    def reset(self):\n        pass"));
        assert!(output.contains("\"--service-port\", \"-p\", dest=\"servicePort\", type=int, default=6001"));
        assert!(output.contains("system(\"title \" + \"Stage service\")"));
        assert!(output.contains("service = StageService()"));
        assert!(output.contains("rpc_server.serve_forever()"));
    }

    #[test]
    fn test_service_strings_are_quoted() {
        let definition = ClassDefinition::parse("Stage", &["__init__", "getValue"]).unwrap();
        let mut config = GeneratorConfig::default();
        config.service.host = r"lab\host".to_string();
        config.service.window_title = Some("My \"Stage\"".to_string());

        let output = ProxyGenerator::new(&definition, config)
            .unwrap()
            .render(Flavor::Service)
            .unwrap();

        assert!(output.contains(r#"    system("title " + "My \"Stage\"")"#));
        assert!(output.contains(r#"type=str, default="lab\\host")"#));
    }

    #[test]
    fn test_invalid_class_suffix() {
        let definition = ClassDefinition::parse("Stage", &["__init__"]).unwrap();
        let mut config = GeneratorConfig::default();
        config.service.class_suffix = "\" Service".to_string();

        let result = ProxyGenerator::new(&definition, config);
        assert!(matches!(result, Err(HalgenError::InvalidClassName(ref name)) if name == "Stage\" Service"));
    }

    #[test]
    fn test_generate_file_name() {
        let generator = generator(&["__init__", "getValue"]);

        let plain = generator.generate(Flavor::Plain).unwrap();
        assert_eq!(plain.path, PathBuf::from("stage_proxy.py"));
        assert_eq!(plain.description, "Proxy for Stage");

        let service = generator.generate(Flavor::Service).unwrap();
        assert_eq!(service.path, PathBuf::from("stage_service.py"));
    }

    #[test]
    fn test_dump_json_is_key_sorted() {
        let generator = generator(&["__init__", "getValue", "reset"]);
        let dump = generator.dump(DumpFormat::Json).unwrap();

        let class_name = dump.find("\"className\"").unwrap();
        let method_specs = dump.find("\"methodSpecs\"").unwrap();
        let property_specs = dump.find("\"propertySpecs\"").unwrap();
        assert!(class_name < method_specs && method_specs < property_specs);
        assert!(dump.contains("\"setter\": null"));
    }

    #[test]
    fn test_dump_toml() {
        let generator = generator(&["__init__", "getValue", "reset"]);
        let dump = generator.dump(DumpFormat::Toml).unwrap();

        assert!(dump.contains("className = \"Stage\""));
        assert!(dump.contains("[[propertySpecs]]"));
        assert!(dump.contains("propertyName = \"value\""));
        assert!(dump.contains("[[methodSpecs]]"));
    }
}
