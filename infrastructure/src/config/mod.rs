//! Configuration loading and raw file structures.

mod file_config;
mod loader;

pub use file_config::{
    ApprovalMode, FileApprovalsConfig, FileConfig, FileToolsConfig, FileTurnConfig,
    FileVaultConfig,
};
pub use loader::ConfigLoader;
