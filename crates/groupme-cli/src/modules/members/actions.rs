use groupme_core::{aggregate, dispatch, Action, ActionRequest, UserId};

use super::render::{
    print_failures, print_json, print_outcomes, print_users_table, target_groups,
};
use crate::cli_args::*;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_users(args: UsersArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let aggregation = aggregate(ctx.gateway, ctx.settings, &ctx.settings.group_ids).await?;
    match args.format {
        OutputFormat::Text => {
            print_failures(&aggregation.failures);
            print_users_table(&aggregation.users);
        }
        OutputFormat::Json => print_json(&aggregation)?,
    }
    Ok(())
}

pub(crate) async fn handle_add(args: AddArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let request = ActionRequest {
        action: Action::Add,
        user_id: Some(UserId::from(args.user_id)),
        phone_number: None,
        group_ids: target_groups(&args.target, ctx.settings),
        nickname: args.nickname,
    };
    run_action(ctx, request, args.target.format).await
}

pub(crate) async fn handle_invite(
    args: InviteArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let request = ActionRequest {
        action: Action::AddNewById,
        user_id: args.user_id.map(UserId::from),
        phone_number: args.phone,
        group_ids: target_groups(&args.target, ctx.settings),
        nickname: args.nickname,
    };
    run_action(ctx, request, args.target.format).await
}

pub(crate) async fn handle_remove(
    args: RemoveArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let action = if args.only {
        Action::RemoveOnly
    } else {
        Action::Remove
    };
    let request = ActionRequest {
        action,
        user_id: Some(UserId::from(args.user_id)),
        phone_number: None,
        group_ids: target_groups(&args.target, ctx.settings),
        nickname: args.nickname,
    };
    run_action(ctx, request, args.target.format).await
}

pub(crate) async fn handle_rename(
    args: RenameArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let request = ActionRequest {
        action: Action::UpdateNickname,
        user_id: Some(UserId::from(args.user_id)),
        phone_number: None,
        group_ids: target_groups(&args.target, ctx.settings),
        nickname: Some(args.nickname),
    };
    run_action(ctx, request, args.target.format).await
}

async fn run_action(
    ctx: &CommandContext<'_>,
    request: ActionRequest,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let outcomes = dispatch(ctx.gateway, ctx.settings, &request).await?;
    print_outcomes(&outcomes, format)?;
    let failed = outcomes.iter().filter(|outcome| outcome.is_failure()).count();
    if failed > 0 {
        anyhow::bail!(
            "{} failed: {failed} of {} steps did not succeed",
            request.action,
            outcomes.len()
        );
    }
    Ok(())
}
