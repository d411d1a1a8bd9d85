use {
    larkwire_channels::{ChannelAccountStatus, ChannelAccounts},
    larkwire_config::LarkwireConfig,
};

use crate::{
    CHANNEL_ID,
    accounts::{FeishuAccountResolver, ResolvedFeishuAccount},
};

/// Feishu / Lark channel, as seen by the channel registry.
#[derive(Debug, Clone, Default)]
pub struct FeishuChannel {
    resolver: FeishuAccountResolver,
}

impl FeishuChannel {
    pub fn new(resolver: FeishuAccountResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &FeishuAccountResolver {
        &self.resolver
    }
}

impl From<ResolvedFeishuAccount> for ChannelAccountStatus {
    fn from(account: ResolvedFeishuAccount) -> Self {
        Self {
            channel_type: CHANNEL_ID.into(),
            endpoint: account
                .configured
                .then(|| account.domain.api_base().to_string()),
            client_id: account.app_id,
            account_id: account.account_id,
            enabled: account.enabled,
            configured: account.configured,
        }
    }
}

impl ChannelAccounts for FeishuChannel {
    fn id(&self) -> &str {
        CHANNEL_ID
    }

    fn list_account_ids(&self, config: &LarkwireConfig) -> Vec<String> {
        self.resolver.list_account_ids(config)
    }

    fn account_status(
        &self,
        config: &LarkwireConfig,
        account_id: Option<&str>,
    ) -> ChannelAccountStatus {
        self.resolver.resolve_account(config, account_id).into()
    }

    fn resolve_default_account_id(&self, config: &LarkwireConfig) -> String {
        self.resolver.resolve_default_account_id(config)
    }

    fn account_statuses(&self, config: &LarkwireConfig) -> Vec<ChannelAccountStatus> {
        self.resolver
            .list_accounts(config)
            .into_iter()
            .map(Into::into)
            .collect()
    }
}
