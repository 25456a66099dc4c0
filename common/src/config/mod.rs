//! YAML-backed configuration plumbing shared by every host of the simulation.

mod content_provider;
mod manager;
mod serializer;

pub use content_provider::{ConfigContentProvider, FileContentConfigProvider, InMemoryConfigProvider};
pub use manager::ConfigManager;
pub use serializer::{ConfigSerializer, YamlConfigSerializer};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
