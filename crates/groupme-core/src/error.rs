use serde::Serialize;

use crate::{GroupId, UserId};

/// Failure taxonomy shared by the gateway, the aggregator and the mutator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncError {
    #[error("configuration error: {message}")]
    Config { message: String },
    #[error("validation error: {message}")]
    Validation { message: String },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
    #[error("user {user_id} is not a member of group {group_id}")]
    NotMember { group_id: GroupId, user_id: UserId },
}

impl SyncError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Validation { .. } => "validation",
            Self::Network { .. } => "network",
            Self::Api { .. } => "api",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::NotMember { .. } => "not_member",
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
