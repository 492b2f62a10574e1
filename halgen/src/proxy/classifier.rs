//! Member classification
//!
//! Partitions the public members of a class into getters, setters and plain
//! methods. A member is a getter if its name starts with `get` (any case), a
//! setter if it starts with `set`; everything else is a plain method. The rest
//! of an accessor's name, with leading underscores removed and the first
//! letter lowercased, is the property it belongs to:
//!
//! ```text
//! getValue   → getter of "value"
//! set_value  → setter of "value"
//! GetSpeed   → getter of "speed"
//! reset      → method
//! ```

use super::member::ClassDefinition;
use super::spec::{MethodDescriptor, SpecDiagnostic};
use super::TemplateHelpers;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Accessor prefixes, compared case-insensitively
const GETTER_PREFIX: &str = "get";
const SETTER_PREFIX: &str = "set";

/// Which side of a property an accessor implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// `get*` member
    Getter,
    /// `set*` member
    Setter,
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Getter => f.write_str("getter"),
            Self::Setter => f.write_str("setter"),
        }
    }
}

/// Result of classifying a class's public members
///
/// Maps are keyed by normalized property name (accessors) or member name
/// (methods).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Getters by property name
    pub getters: BTreeMap<String, MethodDescriptor>,
    /// Setters by property name
    pub setters: BTreeMap<String, MethodDescriptor>,
    /// Plain methods by name
    pub methods: BTreeMap<String, MethodDescriptor>,
    /// Problems noticed while classifying
    pub diagnostics: Vec<SpecDiagnostic>,
}

/// Prefix-based member classifier
pub struct MemberClassifier;

impl MemberClassifier {
    /// Classify the public members of a class definition
    ///
    /// Members are visited in declaration order; when two accessors of the
    /// same kind derive the same property name, or a method is declared
    /// twice, the first one is kept.
    #[must_use]
    pub fn classify(definition: &ClassDefinition) -> Classification {
        let mut classification = Classification::default();

        for member in definition.public_members() {
            let descriptor = MethodDescriptor::from(member);

            let Some((kind, property)) = Self::accessor_of(&member.name) else {
                tracing::debug!(member = %member.name, "classified as method");
                match classification.methods.entry(member.name.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(descriptor);
                    }
                    Entry::Occupied(slot) => {
                        classification
                            .diagnostics
                            .push(SpecDiagnostic::DuplicateMethod {
                                name: member.name.clone(),
                                kept: slot.get().signature().to_string(),
                                ignored: member.to_string(),
                            });
                    }
                }
                continue;
            };

            tracing::debug!(member = %member.name, %kind, %property, "classified as accessor");

            if property.is_empty() {
                classification
                    .diagnostics
                    .push(SpecDiagnostic::AmbiguousProperty {
                        member: member.name.clone(),
                    });
            }

            let accessors = match kind {
                AccessorKind::Getter => &mut classification.getters,
                AccessorKind::Setter => &mut classification.setters,
            };

            match accessors.entry(property) {
                Entry::Vacant(slot) => {
                    slot.insert(descriptor);
                }
                Entry::Occupied(slot) => {
                    classification
                        .diagnostics
                        .push(SpecDiagnostic::DuplicateAccessor {
                            property: slot.key().clone(),
                            kind,
                            kept: slot.get().name.clone(),
                            ignored: member.name.clone(),
                        });
                }
            }
        }

        classification
    }

    /// Accessor kind and derived property name of a member name, if any
    ///
    /// # Examples
    ///
    /// ```
    /// # use halgen::{AccessorKind, MemberClassifier};
    /// assert_eq!(
    ///     MemberClassifier::accessor_of("getValue"),
    ///     Some((AccessorKind::Getter, "value".to_string()))
    /// );
    /// assert_eq!(
    ///     MemberClassifier::accessor_of("SET__Speed"),
    ///     Some((AccessorKind::Setter, "speed".to_string()))
    /// );
    /// assert_eq!(MemberClassifier::accessor_of("reset"), None);
    /// ```
    #[must_use]
    pub fn accessor_of(name: &str) -> Option<(AccessorKind, String)> {
        let kind = if Self::has_prefix(name, GETTER_PREFIX) {
            AccessorKind::Getter
        } else if Self::has_prefix(name, SETTER_PREFIX) {
            AccessorKind::Setter
        } else {
            return None;
        };

        // Prefixes are ASCII, so slicing after them stays on a char boundary
        let remainder = &name[GETTER_PREFIX.len()..];
        Some((kind, Self::property_name(remainder)))
    }

    /// Normalize the part of an accessor name following its prefix
    #[must_use]
    pub fn property_name(remainder: &str) -> String {
        TemplateHelpers::lower_first(remainder.trim_start_matches('_'))
    }

    fn has_prefix(name: &str, prefix: &str) -> bool {
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}
