//! In-memory gateway used by the unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::{
    validate_nickname, AddMemberPayload, GroupGateway, GroupId, GroupSnapshot, Member,
    MembershipId, SyncError, SyncResult,
};

pub(crate) fn member(user_id: &str, nickname: &str, roles: &[&str], membership_id: &str) -> Member {
    Member::new(
        user_id,
        nickname,
        roles.iter().map(|role| role.to_string()).collect(),
        membership_id,
    )
}

#[derive(Default)]
struct State {
    groups: HashMap<String, Result<GroupSnapshot, SyncError>>,
    mutation_failures: HashMap<(String, &'static str), SyncError>,
    fetches: HashMap<String, usize>,
    calls: Vec<String>,
}

#[derive(Default)]
pub(crate) struct FakeGateway {
    state: Mutex<State>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn insert_group(&self, group_id: &str, name: &str, members: Vec<Member>) {
        let snapshot = GroupSnapshot {
            group_id: GroupId::from(group_id),
            name: name.to_string(),
            members,
        };
        self.state()
            .groups
            .insert(group_id.to_string(), Ok(snapshot));
    }

    pub(crate) fn fail_group(&self, group_id: &str, error: SyncError) {
        self.state().groups.insert(group_id.to_string(), Err(error));
    }

    /// Makes `op` (`add`, `remove` or `update`) fail for one group.
    pub(crate) fn fail_mutation(&self, group_id: &str, op: &'static str, error: SyncError) {
        self.state()
            .mutation_failures
            .insert((group_id.to_string(), op), error);
    }

    pub(crate) fn fetch_count(&self, group_id: &str) -> usize {
        self.state().fetches.get(group_id).copied().unwrap_or(0)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub(crate) fn mutation_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("get "))
            .collect()
    }

    fn check_mutation(&self, group_id: &GroupId, op: &'static str) -> SyncResult<()> {
        let state = self.state();
        if let Some(error) = state
            .mutation_failures
            .get(&(group_id.to_string(), op))
        {
            return Err(error.clone());
        }
        match state.groups.get(group_id.as_str()) {
            Some(Ok(_)) => Ok(()),
            Some(Err(error)) => Err(error.clone()),
            None => Err(SyncError::Api {
                status: 404,
                message: "not found".to_string(),
            }),
        }
    }

    fn with_group<T>(&self, group_id: &GroupId, f: impl FnOnce(&mut GroupSnapshot) -> T) -> T {
        let mut state = self.state();
        match state.groups.get_mut(group_id.as_str()) {
            Some(Ok(snapshot)) => f(snapshot),
            _ => unreachable!("checked before mutation"),
        }
    }
}

#[async_trait]
impl GroupGateway for FakeGateway {
    async fn get_group(&self, group_id: &GroupId) -> SyncResult<GroupSnapshot> {
        let mut state = self.state();
        state.calls.push(format!("get {group_id}"));
        *state.fetches.entry(group_id.to_string()).or_insert(0) += 1;
        match state.groups.get(group_id.as_str()) {
            Some(result) => result.clone(),
            None => Err(SyncError::Api {
                status: 404,
                message: "not found".to_string(),
            }),
        }
    }

    async fn add_member(&self, group_id: &GroupId, payload: &AddMemberPayload) -> SyncResult<()> {
        let who = payload
            .user_id
            .as_ref()
            .map(|id| id.to_string())
            .or_else(|| payload.phone_number.clone())
            .unwrap_or_default();
        let nickname = payload.nickname.clone().unwrap_or_default();
        self.state()
            .calls
            .push(format!("add {group_id} {who} {nickname}"));
        self.check_mutation(group_id, "add")?;
        self.with_group(group_id, |snapshot| {
            if !snapshot.members.iter().any(|m| m.user_id.as_str() == who) {
                let membership_id = format!("m-{who}-{group_id}");
                snapshot
                    .members
                    .push(Member::new(who.as_str(), nickname, Vec::new(), membership_id));
            }
        });
        Ok(())
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
    ) -> SyncResult<()> {
        self.state()
            .calls
            .push(format!("remove {group_id} {membership_id}"));
        self.check_mutation(group_id, "remove")?;
        self.with_group(group_id, |snapshot| {
            snapshot
                .members
                .retain(|member| &member.membership_id != membership_id);
        });
        Ok(())
    }

    async fn update_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
        nickname: &str,
    ) -> SyncResult<()> {
        validate_nickname(nickname)?;
        self.state()
            .calls
            .push(format!("update {group_id} {membership_id} {nickname}"));
        self.check_mutation(group_id, "update")?;
        self.with_group(group_id, |snapshot| {
            for member in &mut snapshot.members {
                if &member.membership_id == membership_id {
                    member.nickname = nickname.to_string();
                }
            }
        });
        Ok(())
    }
}
