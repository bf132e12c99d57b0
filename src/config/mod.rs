//! Runtime settings: a YAML file with one section per environment, overridable from the environment.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
