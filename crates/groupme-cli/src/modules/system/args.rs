use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Set(SetConfigArgs),
    Show,
    Clear,
}

#[derive(Args)]
pub struct SetConfigArgs {
    #[arg(long)]
    pub token: Option<String>,
    #[arg(long, help = "Comma-separated group ids, e.g. 12345,67890")]
    pub groups: Option<String>,
    #[arg(long)]
    pub api_base: Option<String>,
}
