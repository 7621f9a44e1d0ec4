use clap::Parser;
use groupme_core::SnapshotCache;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::gateway::{build_client, HttpGateway};
use crate::modules::system::{
    ensure_secure_addr, handle_config_command, load_config, resolve_api_base, resolve_settings,
    save_config, CommandContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let mut config = load_config()?;

    match cli.command {
        Command::Config(args) => {
            handle_config_command(args, &mut config)?;
            save_config(&config)?;
        }
        command => {
            let api_base = resolve_api_base(cli.api_base, &config);
            ensure_secure_addr(&api_base, cli.insecure)?;
            let settings = resolve_settings(cli.token, cli.groups, &config);
            let client = build_client(cli.insecure)?;
            let gateway = SnapshotCache::new(HttpGateway::new(
                client,
                &api_base,
                &settings.api_token,
            ));
            let ctx = CommandContext {
                gateway: &gateway,
                settings: &settings,
            };
            handle_command(command, &ctx).await?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
