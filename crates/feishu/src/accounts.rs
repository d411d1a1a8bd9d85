//! Account resolution.
//!
//! Precedence for a requested account ID:
//!
//! 1. `channels.feishu.accounts.<id>` when it has both an app ID and secret.
//! 2. The legacy top-level credentials, but only for the default account ID.
//!
//! Nothing else falls back. An entry that exists for a non-default ID but is
//! incomplete resolves to nothing, even when the legacy block is complete.

use {
    larkwire_channels::{DEFAULT_ACCOUNT_ID, normalize_account_id},
    larkwire_config::LarkwireConfig,
    secrecy::{ExposeSecret, Secret},
    serde::Serialize,
    tracing::debug,
};

use crate::config::{CredentialFields, FeishuConfig, FeishuDomain};

/// Ready-to-use bot credentials. All strings are trimmed and non-empty.
#[derive(Debug, Clone)]
pub struct ResolvedFeishuCredentials {
    pub app_id: String,
    pub app_secret: Secret<String>,
    pub encrypt_key: Option<Secret<String>>,
    pub verification_token: Option<Secret<String>>,
    pub domain: FeishuDomain,
}

/// Resolved view of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFeishuAccount {
    pub account_id: String,
    /// Channel-wide; every account of the channel shares it.
    pub enabled: bool,
    /// Credentials resolved for this account.
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub domain: FeishuDomain,
}

impl ResolvedFeishuAccount {
    /// Both enabled and configured.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.enabled && self.configured
    }
}

/// Resolves Feishu accounts against an injected default account ID.
#[derive(Debug, Clone)]
pub struct FeishuAccountResolver {
    default_account_id: String,
}

impl Default for FeishuAccountResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_ID)
    }
}

impl FeishuAccountResolver {
    pub fn new(default_account_id: impl Into<String>) -> Self {
        Self {
            default_account_id: default_account_id.into(),
        }
    }

    pub fn default_account_id(&self) -> &str {
        &self.default_account_id
    }

    /// Resolve credentials for `account_id` (default account when `None`).
    ///
    /// The ID is matched exactly as given.
    pub fn resolve_credentials(
        &self,
        channel: Option<&FeishuConfig>,
        account_id: Option<&str>,
    ) -> Option<ResolvedFeishuCredentials> {
        let account_id = account_id.unwrap_or(&self.default_account_id);
        let channel = channel?;

        if let Some(entry) = channel
            .accounts
            .as_ref()
            .and_then(|accounts| accounts.get(account_id))
            && let Some(creds) = credentials_from(entry.credentials(), channel.domain())
        {
            debug!(account_id, "feishu credentials resolved from accounts map");
            return Some(creds);
        }

        if account_id == self.default_account_id {
            let creds = credentials_from(channel.legacy_credentials(), channel.domain());
            debug!(
                account_id,
                resolved = creds.is_some(),
                "feishu credentials from top-level block"
            );
            return creds;
        }

        debug!(account_id, "no feishu credentials for account");
        None
    }

    /// Resolve one account from the full application config.
    pub fn resolve_account(
        &self,
        config: &LarkwireConfig,
        account_id: Option<&str>,
    ) -> ResolvedFeishuAccount {
        let channel = FeishuConfig::lenient(config);
        self.resolve_in(channel.as_ref(), account_id)
    }

    /// Configured account IDs in config order; `[default]` when there is no
    /// (or an empty) accounts map.
    pub fn list_account_ids(&self, config: &LarkwireConfig) -> Vec<String> {
        self.account_ids_in(FeishuConfig::lenient(config).as_ref())
    }

    /// First listed account ID.
    pub fn resolve_default_account_id(&self, config: &LarkwireConfig) -> String {
        self.list_account_ids(config)
            .into_iter()
            .next()
            .unwrap_or_else(|| self.default_account_id.clone())
    }

    /// Every listed account, resolved.
    pub fn list_accounts(&self, config: &LarkwireConfig) -> Vec<ResolvedFeishuAccount> {
        let channel = FeishuConfig::lenient(config);
        self.account_ids_in(channel.as_ref())
            .iter()
            .map(|id| self.resolve_in(channel.as_ref(), Some(id.as_str())))
            .collect()
    }

    /// Listed accounts that are both enabled and configured, in listing order.
    pub fn list_enabled_accounts(&self, config: &LarkwireConfig) -> Vec<ResolvedFeishuAccount> {
        self.list_accounts(config)
            .into_iter()
            .filter(ResolvedFeishuAccount::is_usable)
            .collect()
    }

    fn resolve_in(
        &self,
        channel: Option<&FeishuConfig>,
        account_id: Option<&str>,
    ) -> ResolvedFeishuAccount {
        let enabled = channel.is_none_or(FeishuConfig::is_enabled);
        let creds = self.resolve_credentials(channel, account_id);

        ResolvedFeishuAccount {
            account_id: normalize_account_id(account_id, &self.default_account_id),
            enabled,
            configured: creds.is_some(),
            domain: creds.as_ref().map(|c| c.domain).unwrap_or_default(),
            app_id: creds.map(|c| c.app_id),
        }
    }

    fn account_ids_in(&self, channel: Option<&FeishuConfig>) -> Vec<String> {
        match channel.and_then(FeishuConfig::named_accounts) {
            Some(accounts) => accounts.ids().map(str::to_string).collect(),
            None => vec![self.default_account_id.clone()],
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

fn non_blank_secret(value: Option<&Secret<String>>) -> Option<Secret<String>> {
    value
        .and_then(|s| non_blank(s.expose_secret()))
        .map(|s| Secret::new(s.to_string()))
}

fn credentials_from(
    fields: CredentialFields<'_>,
    domain: FeishuDomain,
) -> Option<ResolvedFeishuCredentials> {
    let app_id = fields.app_id.and_then(non_blank)?;
    let app_secret = non_blank_secret(fields.app_secret)?;

    Some(ResolvedFeishuCredentials {
        app_id: app_id.to_string(),
        app_secret,
        encrypt_key: non_blank_secret(fields.encrypt_key),
        verification_token: non_blank_secret(fields.verification_token),
        domain,
    })
}

// ── Default-account shorthands ──────────────────────────────────────────────

/// [`FeishuAccountResolver::resolve_credentials`] with [`DEFAULT_ACCOUNT_ID`].
pub fn resolve_feishu_credentials(
    channel: Option<&FeishuConfig>,
    account_id: Option<&str>,
) -> Option<ResolvedFeishuCredentials> {
    FeishuAccountResolver::default().resolve_credentials(channel, account_id)
}

pub fn resolve_feishu_account(
    config: &LarkwireConfig,
    account_id: Option<&str>,
) -> ResolvedFeishuAccount {
    FeishuAccountResolver::default().resolve_account(config, account_id)
}

pub fn list_feishu_account_ids(config: &LarkwireConfig) -> Vec<String> {
    FeishuAccountResolver::default().list_account_ids(config)
}

pub fn resolve_default_feishu_account_id(config: &LarkwireConfig) -> String {
    FeishuAccountResolver::default().resolve_default_account_id(config)
}

pub fn list_enabled_feishu_accounts(config: &LarkwireConfig) -> Vec<ResolvedFeishuAccount> {
    FeishuAccountResolver::default().list_enabled_accounts(config)
}
