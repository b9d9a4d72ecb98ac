//! MCP server discovery from Claude Code settings files.
//!
//! Resolution is an ordered, pure scan over candidate file paths: project
//! settings take precedence over user-global settings, `.local` variants
//! over their plain counterparts. The first file containing a matching
//! HTTP-transport entry wins; entries are never merged across files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BridgeError, Result};

/// Transport mechanism declared by a server entry's `type` field.
///
/// Only `http` entries are eligible; everything else (`stdio`, `sse`, ...)
/// is treated as absent because the connector has no fallback transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Remote server reached over HTTP.
    Http,
    /// Any transport this bridge does not speak.
    #[default]
    #[serde(other)]
    Other,
}

/// Resolved configuration for one remote tool server.
///
/// Read fresh from disk on every invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Key of the entry in the `mcpServers` mapping.
    pub name: String,
    /// Endpoint URL.
    pub url: String,
    /// Headers sent with every request (auth tokens live here).
    pub headers: HashMap<String, String>,
}

/// One entry of the `mcpServers` mapping as it appears on disk.
#[derive(Debug, Deserialize)]
struct ServerEntry {
    #[serde(rename = "type", default)]
    transport: TransportKind,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    headers: HashMap<String, String>,
}

/// Top-level shape of a Claude Code settings file.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(rename = "mcpServers", default)]
    mcp_servers: HashMap<String, ServerEntry>,
}

/// Candidate settings locations, highest precedence first.
#[must_use]
pub fn candidate_paths(project_dir: &Path, home_dir: &Path) -> Vec<PathBuf> {
    vec![
        project_dir.join(".claude").join("settings.local.json"),
        project_dir.join(".claude").join("settings.json"),
        home_dir.join(".claude").join("settings.local.json"),
        home_dir.join(".claude").join("settings.json"),
        home_dir.join(".claude.json"),
    ]
}

/// Candidate settings locations for the current process environment.
///
/// # Errors
///
/// Returns `ConfigurationError` if the working directory or home directory
/// cannot be determined.
pub fn default_candidate_paths() -> Result<Vec<PathBuf>> {
    let project_dir = std::env::current_dir().map_err(|e| {
        BridgeError::Configuration(format!("cannot determine working directory: {e}"))
    })?;
    let home_dir = dirs::home_dir()
        .ok_or_else(|| BridgeError::Configuration("cannot determine home directory".to_string()))?;

    Ok(candidate_paths(&project_dir, &home_dir))
}

/// Find the first HTTP server entry matching `pattern` across `paths`.
///
/// Matching is exact-key first, then case-insensitive substring as an
/// explicit fallback. Absent files are skipped; present but unparseable
/// files abort resolution so misconfiguration surfaces early.
///
/// # Errors
///
/// Returns `ConfigurationError` if a present file fails to parse or if no
/// candidate file yields a matching HTTP entry.
pub fn resolve(pattern: &str, paths: &[PathBuf]) -> Result<ServerConfig> {
    for path in paths {
        let Ok(raw) = std::fs::read_to_string(path) else {
            continue;
        };

        let settings: SettingsFile = serde_json::from_str(&raw).map_err(|e| {
            BridgeError::Configuration(format!("malformed settings file {}: {e}", path.display()))
        })?;

        if let Some(config) = match_entry(pattern, &settings.mcp_servers) {
            tracing::debug!(server = %config.name, path = %path.display(), "resolved MCP server");
            return Ok(config);
        }
    }

    let searched = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Err(BridgeError::Configuration(format!(
        "no MCP server matching '{pattern}' with type \"http\" found; searched: {searched}"
    )))
}

/// Pick the matching HTTP entry from one file's `mcpServers` mapping.
fn match_entry(pattern: &str, servers: &HashMap<String, ServerEntry>) -> Option<ServerConfig> {
    if let Some(config) = servers.get(pattern).and_then(|e| eligible(pattern, e)) {
        return Some(config);
    }

    let needle = pattern.to_lowercase();
    servers
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&needle))
        .find_map(|(name, entry)| eligible(name, entry))
}

/// An entry is eligible only when it is HTTP and carries a URL.
fn eligible(name: &str, entry: &ServerEntry) -> Option<ServerConfig> {
    if entry.transport != TransportKind::Http {
        return None;
    }

    entry.url.as_ref().map(|url| ServerConfig {
        name: name.to_string(),
        url: url.clone(),
        headers: entry.headers.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_settings(dir: &Path, file: &str, body: &str) -> PathBuf {
        let path = dir.join(file);
        std::fs::write(&path, body).unwrap();
        path
    }

    const EXA: &str = r#"{
        "mcpServers": {
            "exa": {
                "type": "http",
                "url": "https://mcp.exa.ai/mcp",
                "headers": { "EXA_API_KEY": "k" }
            }
        }
    }"#;

    #[test]
    fn resolve_returns_url_and_headers_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(dir.path(), "settings.json", EXA);

        let config = resolve("exa", &[path]).unwrap();
        assert_eq!(config.name, "exa");
        assert_eq!(config.url, "https://mcp.exa.ai/mcp");
        assert_eq!(config.headers.get("EXA_API_KEY").unwrap(), "k");
    }

    #[test]
    fn higher_precedence_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let local = write_settings(
            dir.path(),
            "settings.local.json",
            r#"{"mcpServers": {"exa": {"type": "http", "url": "https://local.example/mcp"}}}"#,
        );
        let global = write_settings(dir.path(), "settings.json", EXA);

        let config = resolve("exa", &[local, global]).unwrap();
        assert_eq!(config.url, "https://local.example/mcp");
    }

    #[test]
    fn non_http_entry_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(
            dir.path(),
            "settings.json",
            r#"{"mcpServers": {"exa": {"type": "stdio", "command": ["exa-mcp"]}}}"#,
        );

        let err = resolve("exa", &[path]).unwrap_err();
        assert_eq!(err.error_type(), "ConfigurationError");
    }

    #[test]
    fn non_http_match_does_not_shadow_lower_precedence_http_entry() {
        let dir = tempfile::tempdir().unwrap();
        let stdio = write_settings(
            dir.path(),
            "settings.local.json",
            r#"{"mcpServers": {"exa": {"type": "stdio", "command": ["exa-mcp"]}}}"#,
        );
        let http = write_settings(dir.path(), "settings.json", EXA);

        let config = resolve("exa", &[stdio, http]).unwrap();
        assert_eq!(config.url, "https://mcp.exa.ai/mcp");
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("settings.local.json");
        let present = write_settings(dir.path(), "settings.json", EXA);

        let config = resolve("exa", &[missing, present]).unwrap();
        assert_eq!(config.name, "exa");
    }

    #[test]
    fn malformed_file_is_an_error_not_a_skip() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_settings(dir.path(), "settings.local.json", "{not json");
        let good = write_settings(dir.path(), "settings.json", EXA);

        let err = resolve("exa", &[broken, good]).unwrap_err();
        assert_eq!(err.error_type(), "ConfigurationError");
        assert!(err.to_string().contains("settings.local.json"));
    }

    #[test]
    fn no_candidate_file_names_searched_locations() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("settings.local.json");
        let b = dir.path().join("settings.json");

        let err = resolve("exa", &[a.clone(), b]).unwrap_err();
        assert_eq!(err.error_type(), "ConfigurationError");
        assert!(err.to_string().contains(&a.display().to_string()));
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(
            dir.path(),
            "settings.json",
            r#"{"mcpServers": {"Exa-Search": {"type": "http", "url": "https://mcp.exa.ai/mcp"}}}"#,
        );

        let config = resolve("exa", &[path]).unwrap();
        assert_eq!(config.name, "Exa-Search");
    }

    #[test]
    fn exact_key_beats_substring_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(
            dir.path(),
            "settings.json",
            r#"{"mcpServers": {
                "github-enterprise": {"type": "http", "url": "https://enterprise.example/mcp"},
                "github": {"type": "http", "url": "https://api.githubcopilot.com/mcp"}
            }}"#,
        );

        let config = resolve("github", &[path]).unwrap();
        assert_eq!(config.url, "https://api.githubcopilot.com/mcp");
    }

    #[test]
    fn entry_without_url_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_settings(
            dir.path(),
            "settings.json",
            r#"{"mcpServers": {"exa": {"type": "http"}}}"#,
        );

        let err = resolve("exa", &[path]).unwrap_err();
        assert_eq!(err.error_type(), "ConfigurationError");
    }

    #[test]
    fn candidate_paths_order_project_before_home() {
        let paths = candidate_paths(Path::new("/proj"), Path::new("/home/u"));
        assert_eq!(paths[0], Path::new("/proj/.claude/settings.local.json"));
        assert_eq!(paths[1], Path::new("/proj/.claude/settings.json"));
        assert_eq!(paths[2], Path::new("/home/u/.claude/settings.local.json"));
        assert_eq!(paths[3], Path::new("/home/u/.claude/settings.json"));
        assert_eq!(paths[4], Path::new("/home/u/.claude.json"));
    }
}
