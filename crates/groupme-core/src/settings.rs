use crate::{GroupId, SyncError, SyncResult};

/// Credentials and group list every operation runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub api_token: String,
    pub group_ids: Vec<GroupId>,
}

impl Settings {
    pub fn new(api_token: impl Into<String>, group_ids: Vec<GroupId>) -> Self {
        Self {
            api_token: api_token.into(),
            group_ids,
        }
    }

    /// Refuses when the token is blank or no groups are configured.
    pub fn ensure_ready(&self) -> SyncResult<()> {
        if self.api_token.trim().is_empty() {
            return Err(SyncError::config("API token is not configured"));
        }
        if self.group_ids.is_empty() {
            return Err(SyncError::config("no group ids are configured"));
        }
        Ok(())
    }
}

/// Parses a comma-separated group id list, e.g. `12345, 67890`.
///
/// Entries are trimmed, blanks dropped and duplicates removed, keeping order.
#[must_use]
pub fn parse_group_ids(input: &str) -> Vec<GroupId> {
    let mut ids: Vec<GroupId> = Vec::new();
    for entry in input.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let id = GroupId::from(entry);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
