use groupme_core::{Settings, SnapshotCache};
use serde::{Deserialize, Serialize};

use crate::modules::gateway::HttpGateway;

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub api_base: Option<String>,
}

pub(crate) struct CommandContext<'a> {
    pub(crate) gateway: &'a SnapshotCache<HttpGateway>,
    pub(crate) settings: &'a Settings,
}
