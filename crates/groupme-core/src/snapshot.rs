use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::{AddMemberPayload, GroupGateway, GroupId, GroupSnapshot, MembershipId, SyncResult};

/// Memoizes group snapshots for the lifetime of one administrative request.
///
/// Aggregation, member lookups and group labels all read through the same
/// cache, so each group is fetched at most once until it is mutated.
/// Failed fetches are not remembered.
pub struct SnapshotCache<G> {
    inner: G,
    snapshots: Mutex<HashMap<GroupId, GroupSnapshot>>,
}

impl<G: GroupGateway> SnapshotCache<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, group_id: &GroupId) -> Option<GroupSnapshot> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(group_id)
            .cloned()
    }

    fn store(&self, snapshot: &GroupSnapshot) {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(snapshot.group_id.clone(), snapshot.clone());
    }

    fn invalidate(&self, group_id: &GroupId) {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(group_id);
    }
}

#[async_trait]
impl<G: GroupGateway> GroupGateway for SnapshotCache<G> {
    async fn get_group(&self, group_id: &GroupId) -> SyncResult<GroupSnapshot> {
        if let Some(snapshot) = self.cached(group_id) {
            debug!(group_id = %group_id, "group snapshot cache hit");
            return Ok(snapshot);
        }
        let snapshot = self.inner.get_group(group_id).await?;
        self.store(&snapshot);
        Ok(snapshot)
    }

    async fn add_member(&self, group_id: &GroupId, payload: &AddMemberPayload) -> SyncResult<()> {
        self.invalidate(group_id);
        self.inner.add_member(group_id, payload).await
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
    ) -> SyncResult<()> {
        self.invalidate(group_id);
        self.inner.remove_member(group_id, membership_id).await
    }

    async fn update_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
        nickname: &str,
    ) -> SyncResult<()> {
        self.invalidate(group_id);
        self.inner
            .update_member(group_id, membership_id, nickname)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{member, FakeGateway};
    use crate::UserId;

    #[tokio::test]
    async fn fetches_each_group_once_until_mutated() {
        let fake = FakeGateway::new();
        fake.insert_group("100", "Crew", vec![member("u1", "Alice", &[], "m1")]);
        let cache = SnapshotCache::new(&fake);
        let group_id = GroupId::from("100");

        cache.get_group(&group_id).await.expect("first");
        cache.get_group(&group_id).await.expect("second");
        assert_eq!(fake.fetch_count("100"), 1);

        cache
            .remove_member(&group_id, &MembershipId::from("m1"))
            .await
            .expect("remove");
        let snapshot = cache.get_group(&group_id).await.expect("refetch");
        assert_eq!(fake.fetch_count("100"), 2);
        assert!(snapshot.find_member(&UserId::from("u1")).is_none());
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let fake = FakeGateway::new();
        fake.fail_group("100", crate::SyncError::network("timed out"));
        let cache = SnapshotCache::new(&fake);
        let group_id = GroupId::from("100");

        assert!(cache.get_group(&group_id).await.is_err());
        assert!(cache.get_group(&group_id).await.is_err());
        assert_eq!(fake.fetch_count("100"), 2);
    }
}
