//! Credential resolution and `.env` discovery.

use std::path::PathBuf;

use tracing::debug;

/// Environment variables that may carry the provider credential, in
/// precedence order.
const KEY_VARS: [&str; 2] = ["OPENAI_API_KEY", "API_KEY"];

/// Load the first `.env` file found in the workspace root, the crate
/// directory, or the current working directory, in that order.
///
/// Values already present in the process environment win over file values
/// (dotenvy load semantics). Missing files are not an error.
pub fn load_dotenv() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(root) = manifest_dir.parent().and_then(|p| p.parent()) {
        candidates.push(root.to_path_buf());
    }
    candidates.push(manifest_dir);
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }

    for dir in candidates {
        let path = dir.join(".env");
        if path.is_file() {
            debug!("Loading environment from {}", path.display());
            let _ = dotenvy::from_path(&path);
            return;
        }
    }
}

/// Resolve the provider API key from `OPENAI_API_KEY` or `API_KEY`,
/// first defined non-empty value wins. Returns `None` when no credential
/// is configured; callers fail at first use rather than at startup.
pub fn resolve_api_key() -> Option<String> {
    KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
}
