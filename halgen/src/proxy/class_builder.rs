//! Bare class skeletons
//!
//! Emits a class with one `pass` stub per declared method, without any
//! getter/setter pairing. Used by `halgen skeleton` to sketch a template class
//! before its implementation exists.

use super::member::{split_argstring, ClassDefinition, MemberSignature};
use super::TemplateHelpers;

/// Default class name of a fresh builder
const DEFAULT_NAME: &str = "Proxy";

/// Incremental builder for a class skeleton
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    name: String,
    methods: Vec<MemberSignature>,
}

impl Default for ClassBuilder {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            methods: Vec::new(),
        }
    }
}

impl ClassBuilder {
    /// Create a builder for a class named `Proxy`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from every member of a class definition, constructor included
    #[must_use]
    pub fn from_definition(definition: &ClassDefinition) -> Self {
        let mut builder = Self::new().with_name(&definition.name);
        builder.methods.clone_from(&definition.members);
        builder
    }

    /// Set the class name, capitalizing its first letter
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.set_name(name);
        self
    }

    /// Set the class name, capitalizing its first letter
    pub fn set_name(&mut self, name: &str) {
        self.name = TemplateHelpers::upper_first(name);
    }

    /// Current class name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a method from a Python-style argument string such as `(self, x)`
    pub fn add_method(&mut self, name: &str, argstring: &str) {
        self.methods
            .push(MemberSignature::new(name, split_argstring(argstring)));
    }

    /// Render the class
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::ClassBuilder;
    /// let mut builder = ClassBuilder::new().with_name("stage");
    /// builder.add_method("move", "(self, x)");
    /// assert_eq!(
    ///     builder.build_string(),
    ///     "class Stage(object):\n    def move(self, x):\n        pass\n"
    /// );
    /// ```
    #[must_use]
    pub fn build_string(&self) -> String {
        let header = format!("class {}(object):\n", self.name);

        if self.methods.is_empty() {
            return format!("{header}    pass\n");
        }

        let body = self
            .methods
            .iter()
            .map(|method| TemplateHelpers::indent(&Self::build_method_string(method, "pass"), 4))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{header}{body}\n")
    }

    /// Render a single method with the given body
    ///
    /// ```
    /// # use halgen::{ClassBuilder, MemberSignature};
    /// let method = MemberSignature::new("reset", Vec::<String>::new());
    /// assert_eq!(
    ///     ClassBuilder::build_method_string(&method, "return None"),
    ///     "def reset(self):\n    return None"
    /// );
    /// ```
    #[must_use]
    pub fn build_method_string(method: &MemberSignature, body: &str) -> String {
        format!(
            "def {}({}):\n{}",
            method.name,
            method.params(),
            TemplateHelpers::indent(body, 4)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name() {
        assert_eq!(ClassBuilder::new().name(), "Proxy");
    }

    #[test]
    fn test_empty_class_has_pass_body() {
        let builder = ClassBuilder::new().with_name("laser");
        assert_eq!(builder.build_string(), "class Laser(object):\n    pass\n");
    }

    #[test]
    fn test_argstring_normalization() {
        let mut builder = ClassBuilder::new();
        builder.add_method("a", "(self)");
        builder.add_method("b", "()");
        builder.add_method("c", "(self, x, y)");
        builder.add_method("d", "x,");

        let output = builder.build_string();
        assert!(output.contains("    def a(self):\n        pass"));
        assert!(output.contains("    def b(self):\n        pass"));
        assert!(output.contains("    def c(self, x, y):\n        pass"));
        assert!(output.contains("    def d(self, x):\n        pass"));
    }

    #[test]
    fn test_methods_separated_by_blank_line() {
        let mut builder = ClassBuilder::new();
        builder.add_method("first", "");
        builder.add_method("second", "");

        assert_eq!(
            builder.build_string(),
            "class Proxy(object):\n    def first(self):\n        pass\n\n    def second(self):\n        pass\n"
        );
    }

    #[test]
    fn test_from_definition_keeps_all_members() {
        let definition =
            ClassDefinition::parse("stage", &["__init__(port)", "getValue", "_helper"]).unwrap();
        let output = ClassBuilder::from_definition(&definition).build_string();

        assert!(output.starts_with("class Stage(object):"));
        assert!(output.contains("def __init__(self, port):"));
        assert!(output.contains("def getValue(self):"));
        assert!(output.contains("def _helper(self):"));
    }
}
