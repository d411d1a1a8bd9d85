use serde::Serialize;

/// Account identifier used when the caller does not name one.
///
/// Single-account (legacy) channel configs resolve under this ID.
pub const DEFAULT_ACCOUNT_ID: &str = "default";

/// Trim a caller-supplied account ID, falling back to `default_id` when it is
/// absent or blank.
pub fn normalize_account_id(account_id: Option<&str>, default_id: &str) -> String {
    account_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(default_id)
        .to_string()
}

/// Channel-agnostic view of one resolved account, used for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelAccountStatus {
    pub channel_type: String,
    pub account_id: String,
    /// Channel-wide enablement flag.
    pub enabled: bool,
    /// Credentials for this account resolved successfully.
    pub configured: bool,
    /// Public client identifier (never a secret).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// API endpoint the account talks to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ChannelAccountStatus {
    /// Both enabled and configured.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.enabled && self.configured
    }
}
