//! Feishu / Lark channel account resolution.
//!
//! Maps a `channels.feishu` config section to concrete bot credentials.
//! Two layouts are supported and may be mixed:
//!
//! ```toml
//! # legacy single-account form
//! [channels.feishu]
//! app_id = "cli_a1b2c3"
//! app_secret = "${FEISHU_APP_SECRET}"
//!
//! # multi-account form
//! [channels.feishu.accounts.ops]
//! app_id = "cli_d4e5f6"
//! app_secret = "${FEISHU_OPS_SECRET}"
//! ```
//!
//! The legacy top-level block only ever backs the default account.

pub mod accounts;
pub mod config;
pub mod plugin;
pub mod validate;

pub use {
    accounts::{
        FeishuAccountResolver, ResolvedFeishuAccount, ResolvedFeishuCredentials,
        list_enabled_feishu_accounts, list_feishu_account_ids, resolve_default_feishu_account_id,
        resolve_feishu_account, resolve_feishu_credentials,
    },
    config::{CredentialFields, FeishuAccountConfig, FeishuAccounts, FeishuConfig, FeishuDomain},
    plugin::FeishuChannel,
    validate::validate_feishu,
};

/// Channel identifier used in config paths and registries.
pub const CHANNEL_ID: &str = "feishu";
