//! libSQL database configuration.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "petfamily.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local file path, `:memory:`, or a remote `libsql://` / `https://` URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Auth token for remote databases. Ignored for local files.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the URL points at a remote libSQL server rather than a local file.
    pub fn is_remote(&self) -> bool {
        ["libsql://", "https://", "http://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "petfamily.db");
        assert!(!config.is_remote());
    }

    #[test]
    fn detects_remote_schemes() {
        for url in ["libsql://pets.turso.io", "https://pets.turso.io"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                auth_token: String::new(),
            };
            assert!(config.is_remote(), "{url} should be remote");
        }
        let memory = DatabaseConfig {
            url: ":memory:".into(),
            auth_token: String::new(),
        };
        assert!(!memory.is_remote());
    }
}
