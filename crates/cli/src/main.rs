mod account_commands;
mod config_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    larkwire_channels::ChannelRegistry,
    larkwire_feishu::FeishuChannel,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "larkwire", about = "larkwire: Feishu / Lark bot account inspector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Custom config directory (overrides ./ and ~/.config/larkwire/).
    #[arg(long, global = true, env = "LARKWIRE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect configured bot accounts.
    Accounts {
        #[command(subcommand)]
        action: account_commands::AccountAction,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn channel_registry() -> ChannelRegistry {
    let mut registry = ChannelRegistry::new();
    registry.register(Box::new(FeishuChannel::default()));
    registry
}

fn main() -> anyhow::Result<()> {
    // `.env` is optional; secrets referenced as ${VAR} in the config often live there.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_telemetry(&cli);
    debug!(config_dir = ?cli.config_dir, "starting larkwire");

    let registry = channel_registry();
    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Commands::Accounts { action } => {
            account_commands::handle_accounts(action, &registry, config_dir)
        },
        Commands::Config { action } => config_commands::handle_config(action, config_dir),
    }
}
