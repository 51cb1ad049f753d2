//! Vault search capability: full-text and name search over the local
//! markdown corpus.

use async_trait::async_trait;
use glob::glob;
use regex::RegexBuilder;
use scribe_application::ports::capability::{CapabilityOutput, CapabilityPort};
use scribe_domain::{
    CandidateResult, ExecutionError, ResultCaps, SearchScope, ToolKind, ToolParams,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Searches `*.md` files under the vault root.
pub struct VaultSearch {
    root: PathBuf,
}

struct SearchMatch {
    path: PathBuf,
    id: String,
    /// The first matching line, for content searches.
    matched_line: Option<String>,
    /// File content, when the search already read it.
    content: Option<String>,
}

impl VaultSearch {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn relative_id(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

fn title_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[async_trait]
impl CapabilityPort for VaultSearch {
    fn kind(&self) -> ToolKind {
        ToolKind::CorpusSearch
    }

    async fn execute(
        &self,
        params: &ToolParams,
        caps: &ResultCaps,
    ) -> Result<CapabilityOutput, ExecutionError> {
        let (query, scope) = match params {
            ToolParams::CorpusSearch { query, scope } => (query, *scope),
            other => {
                return Err(ExecutionError::invalid_argument(format!(
                    "vault search received {} parameters",
                    other.kind()
                )));
            }
        };
        if query.trim().is_empty() {
            return Err(ExecutionError::invalid_argument("query must not be empty"));
        }

        // Literal, case-insensitive matching; the query is never treated
        // as a pattern.
        let matcher = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|e| ExecutionError::invalid_argument(e.to_string()))?;

        let pattern = self.root.join("**/*.md").to_string_lossy().into_owned();
        let entries =
            glob(&pattern).map_err(|e| ExecutionError::invalid_argument(e.to_string()))?;

        let mut matches: Vec<SearchMatch> = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                // Unreadable directory entries are skipped, not fatal.
                Err(_) => continue,
            };
            if !path.is_file() {
                continue;
            }
            let id = self.relative_id(&path);

            match scope {
                SearchScope::Names => {
                    if matcher.is_match(&id) {
                        matches.push(SearchMatch {
                            path,
                            id,
                            matched_line: None,
                            content: None,
                        });
                    }
                }
                SearchScope::Content => {
                    let Ok(content) = fs::read_to_string(&path) else {
                        continue;
                    };
                    if let Some(line) = content.lines().find(|line| matcher.is_match(line)) {
                        let matched_line = line.trim().to_string();
                        matches.push(SearchMatch {
                            path,
                            id,
                            matched_line: Some(matched_line),
                            content: Some(content),
                        });
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.id.cmp(&b.id));
        let total_found = matches.len();
        debug!(query = %query, scope = ?scope, total_found, "vault search completed");

        let mut candidates = Vec::new();
        for m in matches.into_iter().take(caps.max_results) {
            let raw = match m.content {
                Some(content) => content,
                None => fs::read_to_string(&m.path)
                    .map_err(|e| ExecutionError::io(e.to_string()))?,
            };
            let title = title_for(&m.path);
            let candidate = match m.matched_line {
                Some(line) => {
                    CandidateResult::with_preview(m.id, title, &line, raw, caps.preview_chars)
                }
                None => CandidateResult::new(m.id, title, raw, caps.preview_chars),
            };
            candidates.push(candidate);
        }

        Ok(CapabilityOutput::new(candidates, total_found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault_with_notes(count: usize, needle: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        for i in 0..count {
            let body = format!("# Note {}\n\nSome text about {} here.\n", i, needle);
            fs::write(dir.path().join(format!("note{:02}.md", i)), body).unwrap();
        }
        fs::write(dir.path().join("unrelated.md"), "nothing to see\n").unwrap();
        dir
    }

    fn search_params(query: &str, scope: SearchScope) -> ToolParams {
        ToolParams::CorpusSearch {
            query: query.to_string(),
            scope,
        }
    }

    #[tokio::test]
    async fn test_content_search_caps_results_but_counts_all() {
        let vault = vault_with_notes(15, "typescript");
        let search = VaultSearch::new(vault.path());

        let output = search
            .execute(
                &search_params("typescript", SearchScope::Content),
                &ResultCaps::new(10, 200),
            )
            .await
            .unwrap();

        assert_eq!(output.candidates.len(), 10);
        assert_eq!(output.total_found, 15);
        // Deterministic ordering by relative path.
        assert_eq!(output.candidates[0].id, "note00.md");
        // Preview carries the matching line, not the file head.
        assert!(output.candidates[0].preview.contains("typescript"));
    }

    #[tokio::test]
    async fn test_name_search_matches_case_insensitively() {
        let vault = TempDir::new().unwrap();
        fs::write(vault.path().join("Meeting-Notes.md"), "agenda\n").unwrap();
        fs::write(vault.path().join("journal.md"), "today\n").unwrap();
        let search = VaultSearch::new(vault.path());

        let output = search
            .execute(
                &search_params("meeting", SearchScope::Names),
                &ResultCaps::default(),
            )
            .await
            .unwrap();

        assert_eq!(output.total_found, 1);
        assert_eq!(output.candidates[0].id, "Meeting-Notes.md");
        assert_eq!(output.candidates[0].title, "Meeting-Notes");
    }

    #[tokio::test]
    async fn test_query_is_literal_not_a_pattern() {
        let vault = TempDir::new().unwrap();
        fs::write(vault.path().join("a.md"), "price is $5.00 (sale)\n").unwrap();
        fs::write(vault.path().join("b.md"), "price is 5X00\n").unwrap();
        let search = VaultSearch::new(vault.path());

        let output = search
            .execute(
                &search_params("$5.00", SearchScope::Content),
                &ResultCaps::default(),
            )
            .await
            .unwrap();

        assert_eq!(output.total_found, 1);
        assert_eq!(output.candidates[0].id, "a.md");
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let vault = TempDir::new().unwrap();
        let search = VaultSearch::new(vault.path());

        let err = search
            .execute(
                &search_params("   ", SearchScope::Content),
                &ResultCaps::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, scribe_domain::ExecutionErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_searches_nested_directories() {
        let vault = TempDir::new().unwrap();
        fs::create_dir_all(vault.path().join("projects/alpha")).unwrap();
        fs::write(
            vault.path().join("projects/alpha/plan.md"),
            "roadmap for quartz\n",
        )
        .unwrap();
        let search = VaultSearch::new(vault.path());

        let output = search
            .execute(
                &search_params("quartz", SearchScope::Content),
                &ResultCaps::default(),
            )
            .await
            .unwrap();

        assert_eq!(output.candidates[0].id, "projects/alpha/plan.md");
    }
}
