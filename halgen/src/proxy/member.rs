//! Declared class members
//!
//! A template class is described by an explicit list of member signatures
//! instead of being inspected at runtime. Definitions come from three places:
//!
//! - member specification strings (`getValue`, `setValue(v)`)
//! - a class description file (TOML or JSON)
//! - the [`template_class`](crate::template_class) attribute on an `impl` block
//!
//! # Member specification format
//!
//! ```text
//! reset                 → reset(self)
//! setValue(v)           → setValue(self, v)
//! __init__(self, port)  → constructor taking `port`
//! move(x, y=0, *rest)   → move(self, x, y=0, *rest)
//! ```

use crate::error::{HalgenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of the constructor member
pub const CONSTRUCTOR_NAME: &str = "__init__";

/// Receiver argument, never stored in [`MemberSignature::args`]
const RECEIVER: &str = "self";

/// A single declared member of a template class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberSignature {
    /// Member name as declared (e.g. `getValue`)
    pub name: String,
    /// Argument list, receiver excluded
    #[serde(default)]
    pub args: Vec<String>,
}

impl MemberSignature {
    /// Create a signature from a name and its arguments
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args
                .into_iter()
                .map(Into::into)
                .filter(|arg: &String| arg != RECEIVER)
                .collect(),
        }
    }

    /// Create a constructor signature
    #[must_use]
    pub fn constructor<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(CONSTRUCTOR_NAME, args)
    }

    /// Parse a member specification
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::MemberSignature;
    /// let member = MemberSignature::parse("setValue(self, v)").unwrap();
    /// assert_eq!(member.name, "setValue");
    /// assert_eq!(member.args, vec!["v"]);
    ///
    /// let member = MemberSignature::parse("reset").unwrap();
    /// assert!(member.args.is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HalgenError::InvalidMember`] if:
    /// - the name is empty or not an identifier
    /// - the argument list is not closed by `)`
    /// - trailing text follows the argument list
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let invalid = |reason: &str| HalgenError::InvalidMember {
            spec: input.to_string(),
            reason: reason.to_string(),
        };

        let (name, args) = match input.split_once('(') {
            Some((name, rest)) => {
                let inner = rest
                    .strip_suffix(')')
                    .ok_or_else(|| invalid("argument list must end with ')'"))?;
                if inner.contains(['(', ')']) {
                    return Err(invalid("nested parentheses are not supported"));
                }
                (name.trim(), split_argstring(inner))
            }
            None => (input, Vec::new()),
        };

        if !is_identifier(name) {
            return Err(invalid("member name must be an identifier"));
        }

        Ok(Self::new(name, args))
    }

    /// Whether this member is the constructor
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Whether this member belongs to the public interface
    #[must_use]
    pub fn is_public(&self) -> bool {
        !self.name.starts_with('_')
    }

    /// Parameter list as it appears in a generated `def`, receiver included
    ///
    /// ```
    /// # use halgen::MemberSignature;
    /// assert_eq!(MemberSignature::new("move", ["x", "y=0"]).params(), "self, x, y=0");
    /// assert_eq!(MemberSignature::new("reset", Vec::<String>::new()).params(), "self");
    /// ```
    #[must_use]
    pub fn params(&self) -> String {
        std::iter::once(RECEIVER)
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Argument list used when forwarding a call, annotations and defaults
    /// stripped
    ///
    /// ```
    /// # use halgen::MemberSignature;
    /// let member = MemberSignature::new("move", ["x: int", "y: int = 0", "*rest"]);
    /// assert_eq!(member.call_args(), "x, y, *rest");
    /// ```
    #[must_use]
    pub fn call_args(&self) -> String {
        self.args
            .iter()
            .map(|arg| arg.split([':', '=']).next().unwrap_or(arg).trim())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MemberSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params())
    }
}

/// Split a Python-style argument string, dropping parentheses, blanks and `self`
pub(crate) fn split_argstring(argstring: &str) -> Vec<String> {
    argstring
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty() && *arg != RECEIVER)
        .map(ToString::to_string)
        .collect()
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Entry of the `members` list in a class description file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MemberEntry {
    Spec(String),
    Full(MemberSignature),
}

#[derive(Debug, Deserialize)]
struct ClassFile {
    name: String,
    #[serde(default)]
    members: Vec<MemberEntry>,
}

/// The declared interface of a template class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDefinition {
    /// Class name (e.g. `Stage`)
    pub name: String,
    /// Members in declaration order
    pub members: Vec<MemberSignature>,
}

impl ClassDefinition {
    /// Create a definition from already-built signatures
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<MemberSignature>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Build a definition from member specification strings
    ///
    /// # Errors
    ///
    /// Returns an error if the class name is not an identifier or any member
    /// specification fails to parse.
    pub fn parse<S: AsRef<str>>(name: &str, member_specs: &[S]) -> Result<Self> {
        let name = name.trim();
        if !is_identifier(name) {
            return Err(HalgenError::InvalidClassName(name.to_string()));
        }

        let members = member_specs
            .iter()
            .map(|spec| MemberSignature::parse(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(name, members))
    }

    /// Parse a TOML class description
    ///
    /// ```
    /// # use halgen::ClassDefinition;
    /// let definition = ClassDefinition::from_toml_str(r#"
    ///     name = "Stage"
    ///     members = ["__init__", "getValue", "setValue(v)"]
    /// "#).unwrap();
    /// assert_eq!(definition.members.len(), 3);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or contains invalid
    /// member specifications.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ClassFile = toml::from_str(source)?;
        Self::from_file(file)
    }

    /// Parse a JSON class description
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or contains invalid
    /// member specifications.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let file: ClassFile = serde_json::from_str(source)?;
        Self::from_file(file)
    }

    /// Load a class description from disk
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }

    fn from_file(file: ClassFile) -> Result<Self> {
        let name = file.name.trim();
        if !is_identifier(name) {
            return Err(HalgenError::InvalidClassName(name.to_string()));
        }

        let members = file
            .members
            .into_iter()
            .map(|entry| match entry {
                MemberEntry::Spec(spec) => MemberSignature::parse(&spec),
                MemberEntry::Full(member) if is_identifier(&member.name) => {
                    Ok(MemberSignature::new(member.name, member.args))
                }
                MemberEntry::Full(member) => Err(HalgenError::InvalidMember {
                    spec: member.name,
                    reason: "member name must be an identifier".to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(name, members))
    }

    /// The constructor, if declared
    #[must_use]
    pub fn constructor(&self) -> Option<&MemberSignature> {
        self.members.iter().find(|m| m.is_constructor())
    }

    /// Members that belong to the public interface, in declaration order
    pub fn public_members(&self) -> impl Iterator<Item = &MemberSignature> {
        self.members.iter().filter(|m| m.is_public())
    }
}

/// A Rust type that can describe itself as a template class
///
/// Usually implemented with the [`template_class`](crate::template_class)
/// attribute on the type's inherent `impl` block.
pub trait TemplateClass {
    /// Declared interface of the class
    fn class_definition() -> ClassDefinition;
}
