//! Wire format of the GroupMe v3 endpoints used for membership management.

use serde::{Deserialize, Serialize};

use crate::{
    AddMemberPayload, GroupId, GroupSnapshot, Member, SyncError, SyncResult, UNKNOWN_ERROR,
    UNKNOWN_GROUP,
};

#[derive(Deserialize)]
pub struct GroupEnvelope {
    pub response: Option<GroupBody>,
}

#[derive(Deserialize)]
pub struct GroupBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<MemberRecord>>,
}

#[derive(Deserialize)]
pub struct MemberRecord {
    pub user_id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    pub id: String,
}

#[derive(Serialize)]
pub struct AddMembersRequest {
    pub members: Vec<AddMemberEntry>,
}

#[derive(Serialize)]
pub struct AddMemberEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl From<&AddMemberPayload> for AddMembersRequest {
    fn from(payload: &AddMemberPayload) -> Self {
        Self {
            members: vec![AddMemberEntry {
                user_id: payload.user_id.as_ref().map(|id| id.to_string()),
                phone_number: payload.phone_number.clone(),
                nickname: payload.nickname.clone(),
            }],
        }
    }
}

#[derive(Serialize)]
pub struct UpdateMemberRequest {
    pub nickname: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    meta: Option<ErrorMeta>,
}

#[derive(Deserialize)]
struct ErrorMeta {
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Decodes a `GET /groups/{id}` body. A missing `response.members` is malformed.
pub fn decode_group(group_id: &GroupId, body: &str) -> SyncResult<GroupSnapshot> {
    let envelope: GroupEnvelope = serde_json::from_str(body)
        .map_err(|err| SyncError::malformed(format!("group {group_id}: {err}")))?;
    let group = envelope
        .response
        .ok_or_else(|| SyncError::malformed(format!("group {group_id}: missing response")))?;
    let records = group.members.ok_or_else(|| {
        SyncError::malformed(format!("group {group_id}: missing response.members"))
    })?;
    let members = records
        .into_iter()
        .map(|record| {
            Member::new(
                record.user_id,
                record.nickname.unwrap_or_default(),
                record.roles.unwrap_or_default(),
                record.id,
            )
        })
        .collect();
    Ok(GroupSnapshot {
        group_id: group_id.clone(),
        name: group.name.unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
        members,
    })
}

/// First entry of `meta.errors`, or a generic message when absent.
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.meta)
        .and_then(|meta| meta.errors.into_iter().next())
        .map(|value| match value {
            serde_json::Value::String(message) => message,
            other => other.to_string(),
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
