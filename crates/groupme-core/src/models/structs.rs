use serde::Serialize;

use crate::{
    validate_nickname, GroupId, MembershipId, SyncError, SyncResult, UserId, DEFAULT_ROLE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub user_id: UserId,
    pub nickname: String,
    pub roles: Vec<String>,
    pub membership_id: MembershipId,
}

impl Member {
    /// Builds a member, substituting the default role when none are given.
    pub fn new(
        user_id: impl Into<UserId>,
        nickname: impl Into<String>,
        roles: Vec<String>,
        membership_id: impl Into<MembershipId>,
    ) -> Self {
        let roles = if roles.is_empty() {
            vec![DEFAULT_ROLE.to_string()]
        } else {
            roles
        };
        Self {
            user_id: user_id.into(),
            nickname: nickname.into(),
            roles,
            membership_id: membership_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSnapshot {
    pub group_id: GroupId,
    pub name: String,
    pub members: Vec<Member>,
}

impl GroupSnapshot {
    #[must_use]
    pub fn find_member(&self, user_id: &UserId) -> Option<&Member> {
        self.members.iter().find(|member| &member.user_id == user_id)
    }

    /// Display string for a member of this group, e.g. `Crew (owner, admin)`.
    #[must_use]
    pub fn membership_label(&self, member: &Member) -> String {
        format!("{} ({})", self.name, member.roles.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedUser {
    pub user_id: UserId,
    pub nickname: String,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupFailure {
    pub group_id: GroupId,
    pub error: SyncError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub users: Vec<AggregatedUser>,
    pub failures: Vec<GroupFailure>,
}

impl Aggregation {
    #[must_use]
    pub fn find_user(&self, user_id: &UserId) -> Option<&AggregatedUser> {
        self.users.iter().find(|user| &user.user_id == user_id)
    }

    #[must_use]
    pub fn nickname_of(&self, user_id: &UserId) -> Option<&str> {
        self.find_user(user_id).map(|user| user.nickname.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupLabel {
    pub group_id: GroupId,
    pub label: String,
}

/// Who to add: an existing GroupMe user or someone invited by phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRef {
    User(UserId),
    Phone(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMemberPayload {
    pub user_id: Option<UserId>,
    pub phone_number: Option<String>,
    pub nickname: Option<String>,
}

impl AddMemberPayload {
    pub fn new(
        user_id: Option<UserId>,
        phone_number: Option<String>,
        nickname: Option<String>,
    ) -> SyncResult<Self> {
        let has_user = user_id.as_ref().is_some_and(|id| !id.as_str().is_empty());
        let has_phone = phone_number.as_ref().is_some_and(|phone| !phone.is_empty());
        if !has_user && !has_phone {
            return Err(SyncError::validation(
                "a user id or phone number is required",
            ));
        }
        if let Some(nickname) = nickname.as_deref() {
            validate_nickname(nickname)?;
        }
        Ok(Self {
            user_id,
            phone_number,
            nickname,
        })
    }

    pub fn for_target(target: &MemberRef, nickname: Option<String>) -> SyncResult<Self> {
        match target {
            MemberRef::User(user_id) => Self::new(Some(user_id.clone()), None, nickname),
            MemberRef::Phone(phone) => Self::new(None, Some(phone.clone()), nickname),
        }
    }
}
