//! `larkwire accounts ...`

use std::path::Path;

use {
    anyhow::Result,
    clap::Subcommand,
    larkwire_channels::{ChannelAccountStatus, ChannelAccounts, ChannelRegistry, Error},
    larkwire_config::{LarkwireConfig, discover_and_load},
    tracing::info,
};

#[derive(Subcommand)]
pub enum AccountAction {
    /// List configured accounts.
    List {
        /// Only accounts that are enabled and have complete credentials.
        #[arg(long)]
        enabled: bool,
        /// Restrict to one channel (e.g. "feishu").
        #[arg(long)]
        channel: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show how one account resolves.
    Show {
        /// Account ID; the first listed account when omitted.
        account_id: Option<String>,
        #[arg(long, default_value = "feishu")]
        channel: String,
        /// Fail when the account ID is not listed in the config.
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        json: bool,
    },
}

pub fn handle_accounts(
    action: AccountAction,
    registry: &ChannelRegistry,
    config_dir: Option<&Path>,
) -> Result<()> {
    let config = discover_and_load(config_dir)?;
    run(action, registry, &config)
}

fn run(action: AccountAction, registry: &ChannelRegistry, config: &LarkwireConfig) -> Result<()> {
    match action {
        AccountAction::List {
            enabled,
            channel,
            json,
        } => {
            let statuses = list_statuses(registry, config, channel.as_deref(), enabled)?;
            info!(count = statuses.len(), "listed channel accounts");
            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else if statuses.is_empty() {
                eprintln!("No accounts.");
            } else {
                for status in &statuses {
                    println!("{}", render_row(status));
                }
            }
        },
        AccountAction::Show {
            account_id,
            channel,
            strict,
            json,
        } => {
            let channel = registry.require(&channel)?;
            let status = show_status(channel, config, account_id.as_deref(), strict)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", render_detail(&status));
            }
        },
    }
    Ok(())
}

fn list_statuses(
    registry: &ChannelRegistry,
    config: &LarkwireConfig,
    channel: Option<&str>,
    enabled_only: bool,
) -> larkwire_channels::Result<Vec<ChannelAccountStatus>> {
    let channels: Vec<&dyn ChannelAccounts> = match channel {
        Some(id) => vec![registry.require(id)?],
        None => registry.iter().collect(),
    };

    Ok(channels
        .into_iter()
        .flat_map(|c| {
            if enabled_only {
                c.enabled_account_statuses(config)
            } else {
                c.account_statuses(config)
            }
        })
        .collect())
}

fn show_status(
    channel: &dyn ChannelAccounts,
    config: &LarkwireConfig,
    account_id: Option<&str>,
    strict: bool,
) -> larkwire_channels::Result<ChannelAccountStatus> {
    let account_id =
        account_id.map_or_else(|| channel.resolve_default_account_id(config), str::to_owned);
    if strict && !channel.list_account_ids(config).contains(&account_id) {
        return Err(Error::unknown_account(channel.id(), &account_id));
    }
    Ok(channel.account_status(config, Some(account_id.as_str())))
}

fn flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn render_row(status: &ChannelAccountStatus) -> String {
    format!(
        "{:<8} {:<16} enabled={:<3} configured={:<3} {}",
        status.channel_type,
        status.account_id,
        flag(status.enabled),
        flag(status.configured),
        status.client_id.as_deref().unwrap_or("-"),
    )
}

fn render_detail(status: &ChannelAccountStatus) -> String {
    let mut lines = vec![
        format!("channel:    {}", status.channel_type),
        format!("account:    {}", status.account_id),
        format!("enabled:    {}", flag(status.enabled)),
        format!("configured: {}", flag(status.configured)),
    ];
    if let Some(client_id) = &status.client_id {
        lines.push(format!("app id:     {client_id}"));
    }
    if let Some(endpoint) = &status.endpoint {
        lines.push(format!("endpoint:   {endpoint}"));
    }
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, larkwire_feishu::FeishuChannel, serde_json::json};

    fn registry() -> ChannelRegistry {
        let mut registry = ChannelRegistry::new();
        registry.register(Box::new(FeishuChannel::default()));
        registry
    }

    fn config() -> LarkwireConfig {
        LarkwireConfig::from_json(json!({
            "channels": {
                "feishu": {
                    "accounts": {
                        "ops": { "app_id": "cli_ops", "app_secret": "s" },
                        "draft": {},
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn list_all_and_enabled() {
        let registry = registry();
        let cfg = config();

        let all = list_statuses(&registry, &cfg, None, false).unwrap();
        assert_eq!(all.len(), 2);

        let enabled = list_statuses(&registry, &cfg, Some("feishu"), true).unwrap();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].account_id, "ops");
    }

    #[test]
    fn unknown_channel_is_an_error() {
        let err = list_statuses(&registry(), &config(), Some("slack"), false).unwrap_err();
        assert!(matches!(err, Error::Unavailable { .. }));
    }

    #[test]
    fn strict_show_rejects_unlisted_ids() {
        let registry = registry();
        let channel = registry.require("feishu").unwrap();
        let cfg = config();

        let err = show_status(channel, &cfg, Some("nope"), true).unwrap_err();
        assert_eq!(err.to_string(), "unknown feishu account: nope");

        let status = show_status(channel, &cfg, Some("nope"), false).unwrap();
        assert!(!status.configured);

        let status = show_status(channel, &cfg, None, true).unwrap();
        assert_eq!(status.account_id, "ops");
        assert!(status.configured);

        let legacy = LarkwireConfig::from_json(json!({
            "channels": { "feishu": { "app_id": "cli_a", "app_secret": "s" } }
        }))
        .unwrap();
        let status = show_status(channel, &legacy, None, true).unwrap();
        assert_eq!(status.account_id, "default");
        assert!(status.configured);
    }

    #[test]
    fn renders_rows_and_details() {
        let registry = registry();
        let channel = registry.require("feishu").unwrap();
        let status = channel.account_status(&config(), Some("ops"));

        let row = render_row(&status);
        assert!(row.starts_with("feishu   ops"));
        assert!(row.contains("configured=yes"));
        assert!(row.ends_with("cli_ops"));

        let detail = render_detail(&status);
        assert!(detail.contains("app id:     cli_ops"));
        assert!(detail.contains("endpoint:   https://open.feishu.cn"));
    }

    #[test]
    fn broken_config_file_fails_instead_of_listing_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("larkwire.toml"),
            "[channels.feishu\napp_id = \"cli_a\"\n",
        )
        .unwrap();

        let action = AccountAction::List {
            enabled: false,
            channel: None,
            json: true,
        };
        let err = handle_accounts(action, &registry(), Some(tmp.path())).unwrap_err();
        assert!(err.to_string().contains("larkwire.toml"));
    }

    #[test]
    fn missing_config_file_lists_the_default_account() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = discover_and_load(Some(tmp.path())).unwrap();
        let all = list_statuses(&registry(), &cfg, None, false).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].account_id, "default");
        assert!(!all[0].configured);
    }
}
