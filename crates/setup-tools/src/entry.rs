//! The canonical Jira MCP server entry.

use std::collections::BTreeMap;

use crate::credentials::Credentials;

/// Runner command used to launch the Jira MCP server.
pub const SERVICE_COMMAND: &str = "npx";
/// Arguments passed to [`SERVICE_COMMAND`].
pub const SERVICE_ARGS: &[&str] = &["-y", "jira-mcp-server"];

pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";
pub const ENV_USERNAME: &str = "JIRA_USERNAME";
pub const ENV_PASSWORD: &str = "JIRA_PASSWORD";

/// Tool-agnostic description of the server entry.
///
/// Translated into each tool's native shape by [`crate::family`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl ServiceEntry {
    /// The standard entry carrying `credentials` in its environment block.
    pub fn for_credentials(credentials: &Credentials) -> Self {
        let env = BTreeMap::from([
            (ENV_BASE_URL.to_string(), credentials.base_url.trim().to_string()),
            (ENV_USERNAME.to_string(), credentials.username.clone()),
            (ENV_PASSWORD.to_string(), credentials.password.clone()),
        ]);
        Self {
            command: SERVICE_COMMAND.to_string(),
            args: SERVICE_ARGS.iter().map(|a| (*a).to_string()).collect(),
            env,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_has_exactly_three_keys() {
        let entry = ServiceEntry::for_credentials(&Credentials::new(
            "https://j.example.com",
            "u",
            "p",
        ));
        let keys: Vec<&str> = entry.env.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![ENV_BASE_URL, ENV_PASSWORD, ENV_USERNAME]);
        assert_eq!(entry.env[ENV_BASE_URL], "https://j.example.com");
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let credentials = Credentials::new(" https://j.example.com ", "u", "p");
        let entry = ServiceEntry::for_credentials(&credentials);
        assert_eq!(entry.env[ENV_BASE_URL], "https://j.example.com");
    }
}
