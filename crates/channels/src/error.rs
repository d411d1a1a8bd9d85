/// Crate-wide result type for channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed channel errors shared across channel crates.
///
/// Account resolution itself never fails; these cover the edges around it
/// (strict config parsing, lookups requested by an operator).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested account ID is not listed in the channel config.
    #[error("unknown {channel} account: {account_id}")]
    UnknownAccount { channel: String, account_id: String },

    /// The channel section is missing or the channel is not registered.
    #[error("channel unavailable: {message}")]
    Unavailable { message: String },

    /// The channel's config section does not match its schema.
    #[error("invalid channels.{channel} config: {source}")]
    Config {
        channel: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    #[must_use]
    pub fn unavailable(message: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn unknown_account(
        channel: impl std::fmt::Display,
        account_id: impl std::fmt::Display,
    ) -> Self {
        Self::UnknownAccount {
            channel: channel.to_string(),
            account_id: account_id.to_string(),
        }
    }

    #[must_use]
    pub fn config(channel: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Config {
            channel: channel.into(),
            source,
        }
    }
}
