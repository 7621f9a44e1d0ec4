use indexmap::IndexMap;
use tracing::{info, warn};

use crate::{
    AggregatedUser, Aggregation, GroupFailure, GroupGateway, GroupId, GroupLabel, GroupSnapshot,
    Settings, SyncError, SyncResult, UserId,
};

/// Insertion-ordered fold of group snapshots into one entry per user.
#[derive(Debug, Default)]
pub struct UserIndex {
    users: IndexMap<UserId, AggregatedUser>,
}

impl UserIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one group. The first nickname seen for a user wins; a group
    /// label is appended only if that exact string is not already listed.
    pub fn merge(&mut self, snapshot: &GroupSnapshot) {
        for member in &snapshot.members {
            let label = snapshot.membership_label(member);
            let user = self
                .users
                .entry(member.user_id.clone())
                .or_insert_with(|| AggregatedUser {
                    user_id: member.user_id.clone(),
                    nickname: member.nickname.clone(),
                    groups: Vec::new(),
                });
            if !user.groups.contains(&label) {
                user.groups.push(label);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[must_use]
    pub fn into_users(self) -> Vec<AggregatedUser> {
        self.users.into_values().collect()
    }
}

pub fn fold_snapshots<'a>(
    snapshots: impl IntoIterator<Item = &'a GroupSnapshot>,
) -> Vec<AggregatedUser> {
    let mut index = UserIndex::new();
    for snapshot in snapshots {
        index.merge(snapshot);
    }
    index.into_users()
}

pub(crate) fn ensure_groups_selected(group_ids: &[GroupId]) -> SyncResult<()> {
    if group_ids.is_empty() {
        return Err(SyncError::config("no group ids selected"));
    }
    Ok(())
}

/// Builds the user-keyed membership view across `group_ids`, in order.
///
/// A group that cannot be fetched is reported in `failures` and skipped;
/// only a missing token or an empty group list refuses the whole call.
pub async fn aggregate<G: GroupGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    group_ids: &[GroupId],
) -> SyncResult<Aggregation> {
    settings.ensure_ready()?;
    ensure_groups_selected(group_ids)?;

    let mut index = UserIndex::new();
    let mut failures = Vec::new();
    for group_id in group_ids {
        match gateway.get_group(group_id).await {
            Ok(snapshot) => index.merge(&snapshot),
            Err(error) => {
                info!(group_id = %group_id, error = %error, "skipping group in aggregation");
                failures.push(GroupFailure {
                    group_id: group_id.clone(),
                    error,
                });
            }
        }
    }
    info!(
        groups = group_ids.len(),
        users = index.len(),
        failed = failures.len(),
        "membership aggregated"
    );
    Ok(Aggregation {
        users: index.into_users(),
        failures,
    })
}

/// One display label per group, for building a group picker.
pub async fn group_labels<G: GroupGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    group_ids: &[GroupId],
) -> SyncResult<Vec<GroupLabel>> {
    settings.ensure_ready()?;
    ensure_groups_selected(group_ids)?;

    let mut labels = Vec::with_capacity(group_ids.len());
    for group_id in group_ids {
        let label = match gateway.get_group(group_id).await {
            Ok(snapshot) => snapshot.name,
            Err(error) => {
                warn!(group_id = %group_id, error = %error, "group name unavailable");
                format!("Group ID: {group_id}")
            }
        };
        labels.push(GroupLabel {
            group_id: group_id.clone(),
            label,
        });
    }
    Ok(labels)
}
