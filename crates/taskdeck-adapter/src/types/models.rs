/*
[INPUT]:  Todo collection schema and serde requirements
[OUTPUT]: Canonical Task model shared by client and controller
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Placeholder id carried by a task that has not been persisted yet.
///
/// The server never hands out this id.
pub const DRAFT_TASK_ID: u64 = 0;

/// A single todo item as stored by the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl Task {
    /// Build an unsaved draft task for the given owner.
    pub fn draft(title: impl Into<String>, user_id: u64) -> Self {
        Self {
            id: DRAFT_TASK_ID,
            title: title.into(),
            completed: false,
            user_id,
        }
    }

    /// True for the local placeholder that is still waiting on the server.
    pub fn is_draft(&self) -> bool {
        self.id == DRAFT_TASK_ID
    }
}
