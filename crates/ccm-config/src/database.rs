//! libSQL store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from("ccm.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, used when no remote URL is configured.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://ccm-prod.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the remote database should be used instead of the local file.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.path, "ccm.db");
    }

    #[test]
    fn remote_needs_url_and_token() {
        let config = DatabaseConfig {
            url: "libsql://ccm.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());

        let config = DatabaseConfig {
            auth_token: "token".into(),
            ..config
        };
        assert!(config.is_remote());
    }
}
