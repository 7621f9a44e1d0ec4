use async_trait::async_trait;

use crate::{AddMemberPayload, GroupId, GroupSnapshot, MembershipId, SyncResult};

/// Typed access to the four GroupMe endpoints used for membership management.
///
/// Each call is a single round trip with no retries. Implementations must
/// reject an out-of-bounds nickname in `update_member` before any request.
#[async_trait]
pub trait GroupGateway: Send + Sync {
    async fn get_group(&self, group_id: &GroupId) -> SyncResult<GroupSnapshot>;

    async fn add_member(&self, group_id: &GroupId, payload: &AddMemberPayload) -> SyncResult<()>;

    async fn remove_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
    ) -> SyncResult<()>;

    async fn update_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
        nickname: &str,
    ) -> SyncResult<()>;
}

#[async_trait]
impl<G: GroupGateway + ?Sized> GroupGateway for &G {
    async fn get_group(&self, group_id: &GroupId) -> SyncResult<GroupSnapshot> {
        (**self).get_group(group_id).await
    }

    async fn add_member(&self, group_id: &GroupId, payload: &AddMemberPayload) -> SyncResult<()> {
        (**self).add_member(group_id, payload).await
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
    ) -> SyncResult<()> {
        (**self).remove_member(group_id, membership_id).await
    }

    async fn update_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
        nickname: &str,
    ) -> SyncResult<()> {
        (**self).update_member(group_id, membership_id, nickname).await
    }
}
