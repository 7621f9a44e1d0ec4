use crate::cli_args::*;
use crate::modules::groups::handle_groups;
use crate::modules::members::{handle_add, handle_invite, handle_remove, handle_rename, handle_users};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_command(command: Command, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    match command {
        Command::Users(args) => handle_users(args, ctx).await?,
        Command::Groups(args) => handle_groups(args, ctx).await?,
        Command::Add(args) => handle_add(args, ctx).await?,
        Command::Invite(args) => handle_invite(args, ctx).await?,
        Command::Remove(args) => handle_remove(args, ctx).await?,
        Command::Rename(args) => handle_rename(args, ctx).await?,
        Command::Config(_) => unreachable!(),
    }

    Ok(())
}
