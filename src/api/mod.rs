mod demo;
mod http;

pub use demo::DemoBackend;
pub use http::HttpBackend;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

pub type UserId = u64;

/// Read-only copy of a user record owned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub uniqname: String,
    #[serde(default)]
    pub display_name: String,
}

impl User {
    pub fn new(id: UserId, uniqname: &str, display_name: &str) -> Self {
        Self {
            id,
            uniqname: uniqname.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// Payload for the create-queue operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQueue {
    pub name: String,
    pub description: String,
    pub categories: BTreeSet<String>,
    pub hosts: Vec<User>,
}

/// A queue as echoed back by the server after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub categories: BTreeSet<String>,
    pub hosts: Vec<User>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Forbidden responses prompt for a fresh login instead of an inline error.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden)
    }
}

/// The remote collaborators the wizard talks to: user lookup and queue
/// creation. Implemented over HTTP for real servers and in memory for
/// dryrun mode and tests.
#[allow(async_fn_in_trait)]
pub trait QueueBackend {
    /// Who is signed in, if anyone.
    async fn current_user(&self) -> Result<Option<User>, ApiError>;

    /// Resolve a uniqname to a user record, or fail with `NotFound`.
    async fn confirm_user_exists(&self, uniqname: &str) -> Result<User, ApiError>;

    /// Atomically create a queue from the submitted draft.
    async fn create_queue(&self, queue: &NewQueue) -> Result<Queue, ApiError>;
}
