use std::fmt;

use {
    larkwire_channels::{Error, Result},
    larkwire_config::LarkwireConfig,
    secrecy::Secret,
    serde::{
        Deserialize, Deserializer, Serialize,
        de::{MapAccess, Visitor},
    },
    serde_json::Value,
    tracing::warn,
};

use crate::CHANNEL_ID;

/// Which deployment of the Open Platform a bot lives on.
///
/// Deserialization never fails: names match case-insensitively and any
/// other value falls back to [`FeishuDomain::Feishu`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeishuDomain {
    /// Mainland China deployment (open.feishu.cn).
    #[default]
    Feishu,
    /// International deployment (open.larksuite.com).
    Lark,
}

impl FeishuDomain {
    /// Match a domain name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("feishu") {
            Some(Self::Feishu)
        } else if name.eq_ignore_ascii_case("lark") {
            Some(Self::Lark)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feishu => "feishu",
            Self::Lark => "lark",
        }
    }

    /// Open Platform API base URL, without a trailing slash.
    pub fn api_base(self) -> &'static str {
        match self {
            Self::Feishu => "https://open.feishu.cn",
            Self::Lark => "https://open.larksuite.com",
        }
    }
}

impl fmt::Display for FeishuDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FeishuDomain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw.as_str().and_then(Self::parse).unwrap_or_else(|| {
            warn!(domain = %raw, "unrecognized feishu domain, using {}", Self::default());
            Self::default()
        }))
    }
}

/// Borrowed view of the credential fields shared by account entries and the
/// legacy top-level block.
#[derive(Debug, Clone, Copy)]
pub struct CredentialFields<'a> {
    pub app_id: Option<&'a str>,
    pub app_secret: Option<&'a Secret<String>>,
    pub encrypt_key: Option<&'a Secret<String>>,
    pub verification_token: Option<&'a Secret<String>>,
}

/// One entry of `channels.feishu.accounts`.
///
/// Values are kept exactly as written; trimming happens at resolution time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeishuAccountConfig {
    /// App ID from the developer console (`cli_...`).
    #[serde(alias = "appId")]
    pub app_id: Option<String>,

    /// App secret paired with `app_id`.
    #[serde(alias = "appSecret")]
    pub app_secret: Option<Secret<String>>,

    /// Event subscription encryption key.
    #[serde(alias = "encryptKey")]
    pub encrypt_key: Option<Secret<String>>,

    /// Event subscription verification token.
    #[serde(alias = "verificationToken")]
    pub verification_token: Option<Secret<String>>,

    /// Accepted for symmetry with the top-level block, but resolution
    /// always uses the channel-level domain.
    pub domain: Option<FeishuDomain>,
}

impl FeishuAccountConfig {
    pub fn credentials(&self) -> CredentialFields<'_> {
        CredentialFields {
            app_id: self.app_id.as_deref(),
            app_secret: self.app_secret.as_ref(),
            encrypt_key: self.encrypt_key.as_ref(),
            verification_token: self.verification_token.as_ref(),
        }
    }
}

/// `channels.feishu.accounts`, keyed by account ID, in config order.
#[derive(Debug, Clone, Default)]
pub struct FeishuAccounts {
    entries: Vec<(String, FeishuAccountConfig)>,
}

impl FeishuAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, account_id: impl Into<String>, account: FeishuAccountConfig) {
        let account_id = account_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == account_id) {
            Some((_, slot)) => *slot = account,
            None => self.entries.push((account_id, account)),
        }
    }

    pub fn get(&self, account_id: &str) -> Option<&FeishuAccountConfig> {
        self.entries
            .iter()
            .find(|(id, _)| id == account_id)
            .map(|(_, account)| account)
    }

    pub fn contains(&self, account_id: &str) -> bool {
        self.get(account_id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeishuAccountConfig)> {
        self.entries
            .iter()
            .map(|(id, account)| (id.as_str(), account))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FeishuAccountConfig)> for FeishuAccounts {
    fn from_iter<I: IntoIterator<Item = (K, FeishuAccountConfig)>>(iter: I) -> Self {
        let mut accounts = Self::new();
        for (id, account) in iter {
            accounts.insert(id, account);
        }
        accounts
    }
}

impl<'de> Deserialize<'de> for FeishuAccounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AccountsVisitor;

        impl<'de> Visitor<'de> for AccountsVisitor {
            type Value = FeishuAccounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of account IDs to Feishu credential blocks")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut accounts = FeishuAccounts::new();
                while let Some((id, account)) = map.next_entry::<String, FeishuAccountConfig>()? {
                    accounts.insert(id, account);
                }
                Ok(accounts)
            }
        }

        deserializer.deserialize_map(AccountsVisitor)
    }
}

/// Typed `channels.feishu` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeishuConfig {
    /// Channel-wide switch. Absent means enabled.
    pub enabled: Option<bool>,

    /// API deployment for every account of the channel.
    pub domain: Option<FeishuDomain>,

    // Legacy single-account credentials. They only back the default account.
    #[serde(alias = "appId")]
    pub app_id: Option<String>,
    #[serde(alias = "appSecret")]
    pub app_secret: Option<Secret<String>>,
    #[serde(alias = "encryptKey")]
    pub encrypt_key: Option<Secret<String>>,
    #[serde(alias = "verificationToken")]
    pub verification_token: Option<Secret<String>>,

    /// Named accounts.
    pub accounts: Option<FeishuAccounts>,
}

impl FeishuConfig {
    /// Parse `channels.feishu` strictly. `Ok(None)` when the section is absent.
    pub fn from_config(config: &LarkwireConfig) -> Result<Option<Self>> {
        config
            .channels
            .feishu
            .as_ref()
            .map(|value| Self::deserialize(value).map_err(|e| Error::config(CHANNEL_ID, e)))
            .transpose()
    }

    /// Parse `channels.feishu`, treating a malformed section as absent.
    pub fn lenient(config: &LarkwireConfig) -> Option<Self> {
        Self::from_config(config).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring malformed feishu channel config");
            None
        })
    }

    /// `false` only when `enabled = false` is written explicitly.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }

    /// Channel-level domain, defaulting to [`FeishuDomain::Feishu`].
    pub fn domain(&self) -> FeishuDomain {
        self.domain.unwrap_or_default()
    }

    /// The legacy top-level credential fields.
    pub fn legacy_credentials(&self) -> CredentialFields<'_> {
        CredentialFields {
            app_id: self.app_id.as_deref(),
            app_secret: self.app_secret.as_ref(),
            encrypt_key: self.encrypt_key.as_ref(),
            verification_token: self.verification_token.as_ref(),
        }
    }

    /// Named accounts, when the map is present and has at least one entry.
    pub fn named_accounts(&self) -> Option<&FeishuAccounts> {
        self.accounts.as_ref().filter(|a| !a.is_empty())
    }
}
