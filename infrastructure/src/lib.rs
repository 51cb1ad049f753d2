//! Infrastructure layer for scribe-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod capabilities;
pub mod config;

// Re-export commonly used types
pub use capabilities::{vault_registry, VaultFileRead, VaultSearch};
#[cfg(feature = "web-tools")]
pub use capabilities::WebSearchClient;
pub use config::{ApprovalMode, ConfigLoader, FileConfig};
