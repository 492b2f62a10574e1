//! Proxy code generation
//!
//! Turns the declared members of a template class into proxy source text.
//! It generates:
//! - Plain proxies with Python property accessors
//! - `QObject` proxies with change signals
//! - JSON-RPC service scripts
//! - Bare class skeletons
//!
//! # Example
//!
//! ```bash
//! halgen proxy Stage '__init__' getValue 'setValue(v)' reset --flavor qt
//! ```

pub mod class_builder;
pub mod classifier;
pub mod generator;
pub mod helpers;
pub mod member;
pub mod spec;
pub mod templates;

pub use class_builder::ClassBuilder;
pub use classifier::{AccessorKind, Classification, MemberClassifier};
pub use generator::{GeneratedFile, ProxyGenerator};
pub use helpers::TemplateHelpers;
pub use member::{ClassDefinition, MemberSignature, TemplateClass, CONSTRUCTOR_NAME};
pub use spec::{
    ClassSpec, MethodDescriptor, PropertyDescriptor, SpecBuilder, SpecDiagnostic,
    DEFAULT_PROPERTY_TYPE,
};
pub use templates::TemplateRegistry;
