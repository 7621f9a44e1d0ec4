use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::{
    aggregate, validate_nickname, AddMemberPayload, GroupGateway, GroupId, MemberRef,
    MembershipId, Settings, SyncError, SyncResult, UserId, UNKNOWN_USER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Validate,
    Add,
    Remove,
    ReAdd,
    Rename,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    /// Nothing to do for this group, e.g. the user is not a member.
    Skipped(SyncError),
    Failed(SyncError),
    /// The removal half of a remove-then-re-add went through but the re-add
    /// did not. The removal is not rolled back.
    PartialCompositeFailure(SyncError),
}

/// Result of one step against one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// `None` only for an upfront validation outcome.
    pub group_id: Option<GroupId>,
    pub step: Step,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl Outcome {
    fn for_group(group_id: &GroupId, step: Step, status: OutcomeStatus) -> Self {
        Self {
            group_id: Some(group_id.clone()),
            step,
            nickname: None,
            status,
        }
    }

    fn rejected(error: SyncError) -> Self {
        Self {
            group_id: None,
            step: Step::Validate,
            nickname: None,
            status: OutcomeStatus::Failed(error),
        }
    }

    fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success)
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self.status,
            OutcomeStatus::Failed(_) | OutcomeStatus::PartialCompositeFailure(_)
        )
    }

    #[must_use]
    pub fn error(&self) -> Option<&SyncError> {
        match &self.status {
            OutcomeStatus::Success => None,
            OutcomeStatus::Skipped(error)
            | OutcomeStatus::Failed(error)
            | OutcomeStatus::PartialCompositeFailure(error) => Some(error),
        }
    }
}

/// Per-group outcomes in the order the groups were given.
pub type OutcomeList = Vec<Outcome>;

/// Administrative actions offered by the membership form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    RemoveOnly,
    UpdateNickname,
    AddNewById,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::RemoveOnly => "remove_only",
            Self::UpdateNickname => "update_nickname",
            Self::AddNewById => "add_new_by_id",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = SyncError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "remove_only" => Ok(Self::RemoveOnly),
            "update_nickname" => Ok(Self::UpdateNickname),
            "add_new_by_id" => Ok(Self::AddNewById),
            other => Err(SyncError::validation(format!("unknown action: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: Action,
    pub user_id: Option<UserId>,
    pub phone_number: Option<String>,
    pub group_ids: Vec<GroupId>,
    pub nickname: Option<String>,
}

fn ensure_selection(group_ids: &[GroupId]) -> SyncResult<()> {
    if group_ids.is_empty() {
        return Err(SyncError::validation("select at least one group"));
    }
    Ok(())
}

fn log_outcome(outcome: &Outcome) {
    let group_id = outcome
        .group_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    match &outcome.status {
        OutcomeStatus::Success => {}
        OutcomeStatus::Skipped(reason) => {
            info!(group_id = %group_id, step = ?outcome.step, reason = %reason, "group skipped");
        }
        OutcomeStatus::Failed(error) | OutcomeStatus::PartialCompositeFailure(error) => {
            warn!(
                group_id = %group_id,
                step = ?outcome.step,
                error = %error,
                "membership step failed"
            );
        }
    }
}

async fn resolve_nickname<G: GroupGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    target: &MemberRef,
    group_ids: &[GroupId],
) -> SyncResult<String> {
    let MemberRef::User(user_id) = target else {
        return Ok(UNKNOWN_USER.to_string());
    };
    let aggregation = aggregate(gateway, settings, group_ids).await?;
    Ok(aggregation
        .nickname_of(user_id)
        .filter(|nickname| !nickname.is_empty())
        .unwrap_or(UNKNOWN_USER)
        .to_string())
}

async fn add_one<G: GroupGateway + ?Sized>(
    gateway: &G,
    group_id: &GroupId,
    target: &MemberRef,
    nickname: &str,
    step: Step,
) -> Outcome {
    let result = match AddMemberPayload::for_target(target, Some(nickname.to_string())) {
        Ok(payload) => gateway.add_member(group_id, &payload).await,
        Err(error) => Err(error),
    };
    let status = match result {
        Ok(()) => OutcomeStatus::Success,
        Err(error) => OutcomeStatus::Failed(error),
    };
    Outcome::for_group(group_id, step, status).with_nickname(nickname)
}

/// Finds the membership id of `user_id` in one group, or the outcome to
/// report for that group when it cannot be found.
async fn locate<G: GroupGateway + ?Sized>(
    gateway: &G,
    group_id: &GroupId,
    user_id: &UserId,
    step: Step,
) -> Result<MembershipId, Outcome> {
    let snapshot = gateway
        .get_group(group_id)
        .await
        .map_err(|error| Outcome::for_group(group_id, step, OutcomeStatus::Failed(error)))?;
    snapshot
        .find_member(user_id)
        .map(|member| member.membership_id.clone())
        .ok_or_else(|| {
            let error = SyncError::NotMember {
                group_id: group_id.clone(),
                user_id: user_id.clone(),
            };
            Outcome::for_group(group_id, step, OutcomeStatus::Skipped(error))
        })
}

/// Adds `target` to each group independently.
///
/// Without a nickname, the user's existing nickname in the target groups is
/// reused, falling back to `Unknown User`.
pub async fn add_to_groups<G: GroupGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    target: &MemberRef,
    nickname: Option<&str>,
    group_ids: &[GroupId],
) -> SyncResult<OutcomeList> {
    settings.ensure_ready()?;
    ensure_selection(group_ids)?;
    if let Some(nickname) = nickname {
        if let Err(error) = validate_nickname(nickname) {
            return Ok(vec![Outcome::rejected(error)]);
        }
    }
    let nickname = match nickname {
        Some(nickname) => nickname.to_string(),
        None => resolve_nickname(gateway, settings, target, group_ids).await?,
    };
    info!(groups = group_ids.len(), nickname = %nickname, "adding member to groups");

    let mut outcomes = Vec::with_capacity(group_ids.len());
    for group_id in group_ids {
        let outcome = add_one(gateway, group_id, target, &nickname, Step::Add).await;
        log_outcome(&outcome);
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Removes `user_id` from each group independently.
///
/// With `new_nickname` and `remove_only == false`, every successful removal
/// is followed by a re-add to the same group under the new nickname.
pub async fn remove_from_groups<G: GroupGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    user_id: &UserId,
    group_ids: &[GroupId],
    new_nickname: Option<&str>,
    remove_only: bool,
) -> SyncResult<OutcomeList> {
    settings.ensure_ready()?;
    ensure_selection(group_ids)?;
    let readd = if remove_only { None } else { new_nickname };
    if let Some(nickname) = readd {
        if let Err(error) = validate_nickname(nickname) {
            return Ok(vec![Outcome::rejected(error)]);
        }
    }
    info!(
        user_id = %user_id,
        groups = group_ids.len(),
        readd = readd.is_some(),
        "removing member from groups"
    );

    let target = MemberRef::User(user_id.clone());
    let mut outcomes = Vec::with_capacity(group_ids.len());
    for group_id in group_ids {
        let membership_id = match locate(gateway, group_id, user_id, Step::Remove).await {
            Ok(membership_id) => membership_id,
            Err(outcome) => {
                log_outcome(&outcome);
                outcomes.push(outcome);
                continue;
            }
        };
        let removed = gateway.remove_member(group_id, &membership_id).await;
        let removal = match removed {
            Ok(()) => Outcome::for_group(group_id, Step::Remove, OutcomeStatus::Success),
            Err(error) => Outcome::for_group(group_id, Step::Remove, OutcomeStatus::Failed(error)),
        };
        let removal_succeeded = removal.is_success();
        log_outcome(&removal);
        outcomes.push(removal);

        let Some(nickname) = readd else {
            continue;
        };
        if !removal_succeeded {
            continue;
        }
        let mut readded = add_one(gateway, group_id, &target, nickname, Step::ReAdd).await;
        if let OutcomeStatus::Failed(error) = readded.status {
            readded.status = OutcomeStatus::PartialCompositeFailure(error);
        }
        log_outcome(&readded);
        outcomes.push(readded);
    }
    Ok(outcomes)
}

/// Renames `user_id` in each group where it is a member.
pub async fn update_nickname<G: GroupGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    user_id: &UserId,
    new_nickname: &str,
    group_ids: &[GroupId],
) -> SyncResult<OutcomeList> {
    settings.ensure_ready()?;
    ensure_selection(group_ids)?;
    if let Err(error) = validate_nickname(new_nickname) {
        return Ok(vec![Outcome::rejected(error)]);
    }
    info!(user_id = %user_id, groups = group_ids.len(), "updating nickname");

    let mut outcomes = Vec::with_capacity(group_ids.len());
    for group_id in group_ids {
        let outcome = match locate(gateway, group_id, user_id, Step::Rename).await {
            Ok(membership_id) => {
                let status = match gateway
                    .update_member(group_id, &membership_id, new_nickname)
                    .await
                {
                    Ok(()) => OutcomeStatus::Success,
                    Err(error) => OutcomeStatus::Failed(error),
                };
                Outcome::for_group(group_id, Step::Rename, status).with_nickname(new_nickname)
            }
            Err(outcome) => outcome,
        };
        log_outcome(&outcome);
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Runs one administrative form submission.
pub async fn dispatch<G: GroupGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    request: &ActionRequest,
) -> SyncResult<OutcomeList> {
    settings.ensure_ready()?;
    let nickname = request.nickname.as_deref();
    let user_id = request
        .user_id
        .as_ref()
        .filter(|user_id| !user_id.as_str().trim().is_empty());
    let require_user = || {
        user_id
            .cloned()
            .ok_or_else(|| SyncError::validation("select a user and at least one group"))
    };

    match request.action {
        Action::Add => {
            let target = MemberRef::User(require_user()?);
            add_to_groups(gateway, settings, &target, nickname, &request.group_ids).await
        }
        Action::AddNewById => {
            let target = match (user_id, request.phone_number.as_deref()) {
                (Some(user_id), _) => MemberRef::User(user_id.clone()),
                (None, Some(phone)) if !phone.trim().is_empty() => {
                    MemberRef::Phone(phone.trim().to_string())
                }
                _ => {
                    return Err(SyncError::validation(
                        "a user id or phone number is required",
                    ))
                }
            };
            add_to_groups(gateway, settings, &target, nickname, &request.group_ids).await
        }
        Action::Remove | Action::RemoveOnly => {
            let user_id = require_user()?;
            let remove_only = request.action == Action::RemoveOnly;
            remove_from_groups(
                gateway,
                settings,
                &user_id,
                &request.group_ids,
                nickname,
                remove_only,
            )
            .await
        }
        Action::UpdateNickname => {
            let user_id = require_user()?;
            let nickname = nickname.ok_or_else(|| SyncError::validation("nickname is required"))?;
            update_nickname(gateway, settings, &user_id, nickname, &request.group_ids).await
        }
    }
}
