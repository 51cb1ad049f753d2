//! Capability adapters implementing the application-layer executor port.

mod corpus;
mod file_read;
#[cfg(feature = "web-tools")]
mod web;

pub use corpus::VaultSearch;
pub use file_read::VaultFileRead;
#[cfg(feature = "web-tools")]
pub use web::WebSearchClient;

use scribe_application::ports::capability::CapabilityRegistry;
use scribe_domain::ResultCaps;
use std::path::PathBuf;
use std::sync::Arc;

/// Build the standard registry over one vault root: corpus search and
/// file read, plus web search when the `web-tools` feature is enabled.
pub fn vault_registry(
    root: impl Into<PathBuf>,
    caps: ResultCaps,
    max_concurrent: usize,
) -> CapabilityRegistry {
    let root = root.into();
    let registry = CapabilityRegistry::new(caps, max_concurrent)
        .register(Arc::new(VaultSearch::new(root.clone())))
        .register(Arc::new(VaultFileRead::new(root)));
    #[cfg(feature = "web-tools")]
    let registry = registry.register(Arc::new(WebSearchClient::new()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::ToolKind;

    #[test]
    fn test_registry_covers_vault_tools() {
        let registry = vault_registry("/tmp/vault", ResultCaps::default(), 4);
        assert!(registry.supports(ToolKind::CorpusSearch));
        assert!(registry.supports(ToolKind::FileRead));
    }
}
