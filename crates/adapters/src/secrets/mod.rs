//! `SecretsProvider` adapters.

mod chained;
mod directory;
mod env;
mod memory;

pub use chained::ChainedSecretsProvider;
pub use directory::DirectorySecretsProvider;
pub use env::EnvSecretsProvider;
pub use memory::InMemorySecretsProvider;
