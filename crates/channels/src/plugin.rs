use larkwire_config::LarkwireConfig;

use crate::account::ChannelAccountStatus;

/// Account enumeration contract implemented by every channel.
///
/// All methods are pure reads over a config snapshot.
pub trait ChannelAccounts: Send + Sync {
    /// Channel identifier (e.g. "feishu").
    fn id(&self) -> &str;

    /// Configured account IDs in config order. Never empty.
    fn list_account_ids(&self, config: &LarkwireConfig) -> Vec<String>;

    /// Resolve one account. `None` selects the default account.
    fn account_status(
        &self,
        config: &LarkwireConfig,
        account_id: Option<&str>,
    ) -> ChannelAccountStatus;

    /// Account used when none is named.
    fn resolve_default_account_id(&self, config: &LarkwireConfig) -> String;

    /// Status of every listed account, in listing order.
    fn account_statuses(&self, config: &LarkwireConfig) -> Vec<ChannelAccountStatus> {
        self.list_account_ids(config)
            .iter()
            .map(|id| self.account_status(config, Some(id.as_str())))
            .collect()
    }

    /// Accounts that are both enabled and configured.
    fn enabled_account_statuses(&self, config: &LarkwireConfig) -> Vec<ChannelAccountStatus> {
        self.account_statuses(config)
            .into_iter()
            .filter(ChannelAccountStatus::is_usable)
            .collect()
    }
}
