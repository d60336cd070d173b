/*
[INPUT]:  Owner id, task ids, create and patch bodies
[OUTPUT]: Async task collection operations behind a trait object
[POS]:    API layer - seam between the controller and the transport
[UPDATE]: When collection operations are added or change signature
*/

use async_trait::async_trait;

use crate::http::{Result, TodoClient};
use crate::types::{NewTask, Task, TaskPatch};

/// Remote task collection operations
///
/// `TodoClient` is the HTTP implementation; tests and alternative
/// backends implement this directly.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// List every task owned by `user_id`, in server order
    async fn list_tasks(&self, user_id: u64) -> Result<Vec<Task>>;

    /// Persist a new task and return it with its server id
    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    /// Apply the set fields of `patch` and return the canonical task
    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task>;

    /// Remove a task
    async fn delete_task(&self, id: u64) -> Result<()>;
}

#[async_trait]
impl TaskApi for TodoClient {
    async fn list_tasks(&self, user_id: u64) -> Result<Vec<Task>> {
        TodoClient::list_tasks(self, user_id).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        TodoClient::create_task(self, task).await
    }

    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task> {
        TodoClient::update_task(self, id, patch).await
    }

    async fn delete_task(&self, id: u64) -> Result<()> {
        TodoClient::delete_task(self, id).await
    }
}
