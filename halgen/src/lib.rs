//! halgen: proxy code generation for hardware abstraction layers
//!
//! Hand-written wrappers around instrument drivers repeat the same delegation
//! code for every getter, setter and method. halgen takes the declared
//! interface of a template class and emits that code for you, in one of three
//! flavors:
//!
//! - **plain**: a proxy class forwarding properties to a `target` object
//! - **qt**: a `QObject` proxy with one change signal per property
//! - **service**: a standalone JSON-RPC service exposing the accessors
//!
//! # Quick Start
//!
//! ```rust
//! use halgen::{ClassDefinition, Flavor, GeneratorConfig, ProxyGenerator};
//!
//! # fn main() -> halgen::Result<()> {
//! let stage = ClassDefinition::parse(
//!     "Stage",
//!     &["__init__", "getValue", "setValue(v)", "reset"],
//! )?;
//!
//! let generator = ProxyGenerator::new(&stage, GeneratorConfig::default())?;
//! let source = generator.render(Flavor::Plain)?;
//! assert!(source.contains("class StageProxy(object):"));
//! # Ok(())
//! # }
//! ```
//!
//! Rust types can describe themselves with [`template_class`]:
//!
//! ```rust
//! use halgen::{template_class, GeneratorConfig, ProxyGenerator};
//!
//! pub struct Stage { value: f64 }
//!
//! #[template_class]
//! impl Stage {
//!     pub fn new() -> Self { Self { value: 0.0 } }
//!     pub fn get_value(&self) -> f64 { self.value }
//!     pub fn set_value(&mut self, value: f64) { self.value = value; }
//! }
//!
//! # fn main() -> halgen::Result<()> {
//! let generator = ProxyGenerator::for_class::<Stage>(GeneratorConfig::default())?;
//! assert!(generator.spec().property("value").is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod observability;
pub mod proxy;

pub use config::{AccessorStyle, DumpFormat, Flavor, GeneratorConfig, ServiceSettings};
pub use error::{HalgenError, Result};
pub use halgen_macros::template_class;
pub use proxy::{
    AccessorKind, ClassBuilder, ClassDefinition, ClassSpec, GeneratedFile, MemberClassifier,
    MemberSignature, MethodDescriptor, PropertyDescriptor, ProxyGenerator, SpecBuilder,
    SpecDiagnostic, TemplateClass, TemplateHelpers,
};
