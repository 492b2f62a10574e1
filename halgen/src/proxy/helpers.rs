//! Naming helpers for code generation
//!
//! Naming conventions shared by the classifier, the templates and the class
//! builder.

use inflector::Inflector;

/// Template helpers for Handlebars code generation
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("StageProxy"), "stage_proxy");
    /// assert_eq!(TemplateHelpers::to_snake_case("XYStage"), "xy_stage");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Lowercase the first character, leaving the rest untouched
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::lower_first("Speed"), "speed");
    /// assert_eq!(TemplateHelpers::lower_first("XPosition"), "xPosition");
    /// assert_eq!(TemplateHelpers::lower_first(""), "");
    /// ```
    #[must_use]
    pub fn lower_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }

    /// Uppercase the first character, leaving the rest untouched
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::upper_first("stage"), "Stage");
    /// assert_eq!(TemplateHelpers::upper_first("xyStage"), "XyStage");
    /// ```
    #[must_use]
    pub fn upper_first(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Change-notification signal name for a property
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_signal_name("position"), "positionChanged");
    /// ```
    #[must_use]
    pub fn to_signal_name(property: &str) -> String {
        format!("{property}Changed")
    }

    /// Python module file name for a generated class
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_file_name("StageProxy"), "stage_proxy.py");
    /// ```
    #[must_use]
    pub fn to_file_name(class_name: &str) -> String {
        format!("{}.py", Self::to_snake_case(class_name))
    }

    /// Double-quoted Python string literal for `text`
    ///
    /// JSON string escaping is also valid Python escaping.
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_string_literal("127.0.0.1"), "\"127.0.0.1\"");
    /// assert_eq!(TemplateHelpers::to_string_literal("My \"Stage\""), r#""My \"Stage\"""#);
    /// ```
    #[must_use]
    pub fn to_string_literal(text: &str) -> String {
        serde_json::Value::from(text).to_string()
    }

    /// Indent every non-empty line by `amount` spaces
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::indent("def f(self):\n    pass", 4), "    def f(self):\n        pass");
    /// ```
    #[must_use]
    pub fn indent(text: &str, amount: usize) -> String {
        let padding = " ".repeat(amount);
        text.split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{padding}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
