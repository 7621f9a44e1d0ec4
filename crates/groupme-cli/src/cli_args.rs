use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::groups::args::*;
pub use crate::modules::members::args::*;
pub use crate::modules::system::args::*;

#[derive(Parser)]
#[command(name = "groupme")]
#[command(about = "Manage members across GroupMe groups")]
pub struct Cli {
    #[arg(long, env = "GROUPME_API_BASE")]
    pub api_base: Option<String>,
    #[arg(long, env = "GROUPME_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    #[arg(
        long,
        env = "GROUPME_GROUPS",
        help = "Comma-separated group ids, overriding the configured list"
    )]
    pub groups: Option<String>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, help = "Allow an http:// API base and invalid TLS certificates")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Manage stored API token and group ids")]
    Config(ConfigArgs),
    #[command(about = "List members of all configured groups, merged per user")]
    Users(UsersArgs),
    #[command(about = "List configured groups by name")]
    Groups(GroupsArgs),
    #[command(about = "Add a listed user to groups")]
    Add(AddArgs),
    #[command(about = "Add a user by id or phone number")]
    Invite(InviteArgs),
    #[command(about = "Remove a user from groups, optionally re-adding with a new nickname")]
    Remove(RemoveArgs),
    #[command(about = "Change a user's nickname in groups")]
    Rename(RenameArgs),
}
