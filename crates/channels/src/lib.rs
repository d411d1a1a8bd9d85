//! Shared channel contract.
//!
//! Each messaging channel (Feishu/Lark, ...) implements [`ChannelAccounts`]
//! so hosts can fan out over configured bot accounts without knowing how a
//! given channel lays out its credentials.

pub mod account;
pub mod error;
pub mod plugin;
pub mod registry;

pub use {
    account::{ChannelAccountStatus, DEFAULT_ACCOUNT_ID, normalize_account_id},
    error::{Error, Result},
    plugin::ChannelAccounts,
    registry::ChannelRegistry,
};
