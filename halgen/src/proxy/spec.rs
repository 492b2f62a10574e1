//! Class spec construction
//!
//! Pairs the getters and setters found by the classifier into property
//! descriptors and collects the remaining methods. The resulting [`ClassSpec`]
//! is what templates render and what the `spec` dump serializes.

use super::classifier::{AccessorKind, Classification};
use super::member::{ClassDefinition, MemberSignature};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Placeholder type used for every property unless configured otherwise
pub const DEFAULT_PROPERTY_TYPE: &str = "float";

/// One member of the template class, as referenced by generated code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// Member name on the target (e.g. `getValue`)
    pub name: String,
    /// Declared arguments, receiver excluded
    pub args: Vec<String>,
}

impl From<&MemberSignature> for MethodDescriptor {
    fn from(member: &MemberSignature) -> Self {
        Self {
            name: member.name.clone(),
            args: member.args.clone(),
        }
    }
}

impl MethodDescriptor {
    /// Signature view of this descriptor
    #[must_use]
    pub fn signature(&self) -> MemberSignature {
        MemberSignature::new(self.name.clone(), self.args.clone())
    }
}

/// A logical attribute backed by a getter, a setter, or both
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name, first letter lowercased
    pub property_name: String,
    /// Getter on the target, if declared
    pub getter: Option<MethodDescriptor>,
    /// Setter on the target, if declared
    pub setter: Option<MethodDescriptor>,
    /// Value type placeholder
    pub property_type: String,
}

/// Descriptors of a template class's public interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSpec {
    /// Name of the template class
    pub class_name: String,
    /// One descriptor per property, ordered by property name
    pub property_specs: Vec<PropertyDescriptor>,
    /// Plain methods, ordered by name
    pub method_specs: Vec<MethodDescriptor>,
    /// Problems noticed while building the spec
    #[serde(skip)]
    pub diagnostics: Vec<SpecDiagnostic>,
}

impl ClassSpec {
    /// Look up a property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.property_specs.iter().find(|p| p.property_name == name)
    }

    /// Look up a plain method by name
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.method_specs.iter().find(|m| m.name == name)
    }

    /// Fail on the first diagnostic
    ///
    /// # Errors
    ///
    /// Returns the first recorded [`SpecDiagnostic`].
    pub fn ensure_clean(&self) -> Result<(), SpecDiagnostic> {
        self.diagnostics.first().map_or(Ok(()), |d| Err(d.clone()))
    }
}

/// Non-fatal problem in a class's member naming
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecDiagnostic {
    /// Accessor named just `get`/`set`, yielding an empty property name
    #[error("member '{member}' derives an empty property name")]
    AmbiguousProperty {
        /// Offending member
        member: String,
    },

    /// Two accessors of the same kind map to one property
    #[error("property '{property}' has two {kind}s: kept '{kept}', ignored '{ignored}'")]
    DuplicateAccessor {
        /// Shared property name
        property: String,
        /// Getter or setter
        kind: AccessorKind,
        /// Accessor that was kept
        kept: String,
        /// Accessor that was dropped
        ignored: String,
    },

    /// A plain method is declared more than once
    #[error("method '{name}' is declared twice: kept '{kept}', ignored '{ignored}'")]
    DuplicateMethod {
        /// Method name
        name: String,
        /// Signature that was kept
        kept: String,
        /// Signature that was dropped
        ignored: String,
    },

    /// A property and a plain method share a name
    #[error("property '{name}' collides with method '{name}'; both are generated")]
    NameCollision {
        /// Shared name
        name: String,
    },
}

/// Builds a [`ClassSpec`] from a classification
pub struct SpecBuilder {
    property_type: String,
}

impl Default for SpecBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PROPERTY_TYPE)
    }
}

impl SpecBuilder {
    /// Create a builder that tags properties with `property_type`
    #[must_use]
    pub fn new(property_type: impl Into<String>) -> Self {
        Self {
            property_type: property_type.into(),
        }
    }

    /// Build the spec of `definition` from its classification
    #[must_use]
    pub fn build(&self, definition: &ClassDefinition, classification: Classification) -> ClassSpec {
        let Classification {
            mut getters,
            mut setters,
            methods,
            mut diagnostics,
        } = classification;

        let names: BTreeSet<String> = getters.keys().chain(setters.keys()).cloned().collect();

        let property_specs: Vec<PropertyDescriptor> = names
            .into_iter()
            .map(|name| PropertyDescriptor {
                getter: getters.remove(&name),
                setter: setters.remove(&name),
                property_type: self.property_type.clone(),
                property_name: name,
            })
            .collect();

        diagnostics.extend(
            property_specs
                .iter()
                .filter(|p| methods.contains_key(&p.property_name))
                .map(|p| SpecDiagnostic::NameCollision {
                    name: p.property_name.clone(),
                }),
        );

        ClassSpec {
            class_name: definition.name.clone(),
            property_specs,
            method_specs: methods.into_values().collect(),
            diagnostics,
        }
    }
}
