use groupme_core::{
    AggregatedUser, GroupFailure, GroupId, Outcome, OutcomeStatus, Settings, Step, SyncError,
};

use crate::cli_args::{OutputFormat, TargetGroupsArgs};

/// Explicit `--group` values, or every configured group.
pub(crate) fn target_groups(args: &TargetGroupsArgs, settings: &Settings) -> Vec<GroupId> {
    let selected: Vec<GroupId> = args
        .groups
        .iter()
        .map(|group| group.trim())
        .filter(|group| !group.is_empty())
        .map(GroupId::from)
        .collect();
    if selected.is_empty() {
        settings.group_ids.clone()
    } else {
        selected
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_users_table(users: &[AggregatedUser]) {
    let mut nickname_width = "NICKNAME".len();
    let mut id_width = "USER ID".len();
    for user in users {
        nickname_width = nickname_width.max(user.nickname.chars().count());
        id_width = id_width.max(user.user_id.as_str().len());
    }

    println!(
        "{:<nickname_width$}  {:<id_width$}  GROUPS",
        "NICKNAME", "USER ID"
    );
    for user in users {
        println!(
            "{:<nickname_width$}  {:<id_width$}  {}",
            user.nickname,
            user.user_id.as_str(),
            user.groups.join(", ")
        );
    }
}

pub(crate) fn print_failures(failures: &[GroupFailure]) {
    for failure in failures {
        eprintln!(
            "warning: group {} skipped: {}",
            failure.group_id, failure.error
        );
    }
}

pub(crate) fn print_outcomes(outcomes: &[Outcome], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for outcome in outcomes {
                println!("{}", outcome_line(outcome));
            }
            Ok(())
        }
        OutputFormat::Json => print_json(&outcomes),
    }
}

fn failed_verb(step: Step) -> &'static str {
    match step {
        Step::Validate => "validating",
        Step::Add => "adding user to",
        Step::Remove => "removing user from",
        Step::ReAdd => "re-adding user to",
        Step::Rename => "updating nickname in",
    }
}

/// Human-readable status line for one outcome.
pub(crate) fn outcome_line(outcome: &Outcome) -> String {
    let group = outcome
        .group_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let nickname = outcome.nickname.as_deref().unwrap_or_default();
    match (&outcome.status, outcome.step) {
        (OutcomeStatus::Failed(error), Step::Validate) => format!("Rejected: {error}"),
        (OutcomeStatus::Success, Step::Add) => {
            format!("User successfully added to group {group} as {nickname}.")
        }
        (OutcomeStatus::Success, Step::ReAdd) => {
            format!("User re-added to group {group} as {nickname}.")
        }
        (OutcomeStatus::Success, Step::Remove) => {
            format!("User successfully removed from group {group}.")
        }
        (OutcomeStatus::Success, Step::Rename) => {
            format!("Nickname updated to {nickname} in group {group}.")
        }
        (OutcomeStatus::Success, Step::Validate) => "Validated.".to_string(),
        (OutcomeStatus::Skipped(SyncError::NotMember { .. }), _) => {
            format!("User is not a member of group {group}.")
        }
        (OutcomeStatus::Skipped(error), _) => format!("Skipped group {group}: {error}"),
        (OutcomeStatus::Failed(error), step) => {
            format!("Error {} group {group}: {error}", failed_verb(step))
        }
        (OutcomeStatus::PartialCompositeFailure(error), _) => {
            format!("User removed from group {group} but could not be re-added: {error}")
        }
    }
}
