//! CLI command implementations

pub mod config;
pub mod input;
pub mod proxy;
pub mod skeleton;
pub mod spec;

pub use config::ConfigCommand;
pub use input::ClassInput;
pub use proxy::ProxyCommand;
pub use skeleton::SkeletonCommand;
pub use spec::SpecCommand;
