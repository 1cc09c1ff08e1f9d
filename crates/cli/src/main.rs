use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "squelch", about = "Squelch — WebRTC push-to-talk signaling relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the signaling gateway.
    Serve {
        /// Bind address (overrides config).
        #[arg(long)]
        bind: Option<String>,
        /// TCP port (overrides config).
        #[arg(long)]
        port: Option<u16>,
        /// Load config from this directory only, skipping the standard
        /// search locations.
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "squelch starting");

    match cli.command {
        Commands::Serve {
            bind,
            port,
            config_dir,
        } => {
            if let Some(dir) = config_dir {
                squelch_config::set_config_dir(dir);
            }
            let config = squelch_config::discover_and_load();
            let bind = bind.unwrap_or(config.gateway.bind);
            let port = port.unwrap_or(config.gateway.port);
            squelch_gateway::server::start_gateway(&bind, port).await
        },
        Commands::Config => {
            let config = squelch_config::discover_and_load();
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        },
    }
}
