//! Config schema types.
//!
//! Channel crates own the typed shape of their own section; the root schema
//! keeps each channel as a raw JSON value so that this crate does not depend
//! on any channel implementation.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LarkwireConfig {
    pub channels: ChannelsConfig,
}

/// Channel configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    /// Feishu / Lark bot channel. Either a flat single-account table or a
    /// table with an `accounts` map keyed by account ID (or both).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feishu: Option<serde_json::Value>,
}

impl LarkwireConfig {
    /// Build a config from a JSON value, mostly useful in tests and for hosts
    /// that already hold a parsed document.
    pub fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}
