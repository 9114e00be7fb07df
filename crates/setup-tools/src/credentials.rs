//! Jira credentials collected by the interactive flow.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(\[[0-9a-f:.]+\]|[^\s/?#:@\[\]]+)(:\d{1,5})?([/?#]\S*)?$")
        .expect("valid URL regex")
});

/// Returns true when `value` looks like an http(s) URL with a host name or a
/// bracketed IPv6 address. The scheme is case-insensitive.
pub fn is_url_like(value: &str) -> bool {
    URL_LIKE.is_match(value.trim())
}

/// Base URL, username and password for the Jira server.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
