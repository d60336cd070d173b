/*
[INPUT]:  Owner id, task ids, create and patch bodies
[OUTPUT]: Canonical tasks returned by the todo collection
[POS]:    HTTP layer - todo collection endpoints
[UPDATE]: When adding new endpoints or changing query parameters
*/

use reqwest::Method;

use crate::http::{Result, TodoClient};
use crate::types::{NewTask, Task, TaskPatch};

impl TodoClient {
    /// List every task owned by a user
    ///
    /// GET /todos?userId={user_id}
    pub async fn list_tasks(&self, user_id: u64) -> Result<Vec<Task>> {
        let builder = self
            .request(Method::GET, "todos")?
            .query(&[("userId", user_id)]);
        let tasks: Vec<Task> = self.send_json(builder).await?;
        tracing::debug!(user_id, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Create a task; the server assigns its id
    ///
    /// POST /todos
    pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let builder = self.request(Method::POST, "todos")?.json(task);
        let created: Task = self.send_json(builder).await?;
        tracing::debug!(id = created.id, "created task");
        Ok(created)
    }

    /// Apply a partial update and return the stored task
    ///
    /// PATCH /todos/{id}
    pub async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let endpoint = format!("todos/{id}");
        let builder = self.request(Method::PATCH, &endpoint)?.json(patch);
        self.send_json(builder).await
    }

    /// Delete a task
    ///
    /// DELETE /todos/{id}
    pub async fn delete_task(&self, id: u64) -> Result<()> {
        let endpoint = format!("todos/{id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_empty(builder).await
    }
}
