/*
[INPUT]:  Test scenarios needing a remote task collection
[OUTPUT]: Scripted in-memory TaskApi with failure injection and call gating
[POS]:    Test infrastructure - shared across taskdeck test modules
[UPDATE]: When adding new test patterns or fixtures
*/

#![allow(dead_code)]

use std::collections::HashSet;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use taskdeck::{StoreConfig, StoreState, TaskStore};
use taskdeck_adapter::{NewTask, Result, Task, TaskApi, TaskPatch, TodoApiError};
use tokio::sync::{Semaphore, watch};

pub const OWNER: u64 = 3344;

/// One request as the fake saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(u64),
    Create(NewTask),
    Update(u64, TaskPatch),
    Delete(u64),
}

/// In-memory todo collection.
///
/// Failures are injected per operation (and per id for update/delete).
/// A gated fake holds every call until `release` hands out permits, so
/// tests can look at state while requests are in flight.
pub struct FakeApi {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicU64,
    calls: Mutex<Vec<Call>>,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_update: Mutex<HashSet<u64>>,
    fail_delete: Mutex<HashSet<u64>>,
    gate: Option<Semaphore>,
}

impl FakeApi {
    pub fn new(tasks: Vec<Task>) -> Arc<Self> {
        Arc::new(Self::build(tasks, None))
    }

    pub fn gated(tasks: Vec<Task>) -> Arc<Self> {
        Arc::new(Self::build(tasks, Some(Semaphore::new(0))))
    }

    fn build(tasks: Vec<Task>, gate: Option<Semaphore>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        Self {
            tasks: Mutex::new(tasks),
            next_id: AtomicU64::new(next_id),
            calls: Mutex::new(Vec::new()),
            fail_list: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_update: Mutex::new(HashSet::new()),
            fail_delete: Mutex::new(HashSet::new()),
            gate,
        }
    }

    pub fn fail_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_update(&self, id: u64) {
        self.fail_update.lock().unwrap().insert(id);
    }

    pub fn fail_delete(&self, id: u64) {
        self.fail_delete.lock().unwrap().insert(id);
    }

    /// Let `count` gated calls proceed
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn server_tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

fn server_error() -> TodoApiError {
    TodoApiError::Api {
        code: 500,
        message: "injected failure".to_string(),
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list_tasks(&self, user_id: u64) -> Result<Vec<Task>> {
        self.enter(Call::List(user_id)).await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.enter(Call::Create(task.clone())).await;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let saved = Task {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: task.title.clone(),
            completed: task.completed,
            user_id: task.user_id,
        };
        self.tasks.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task> {
        self.enter(Call::Update(id, patch.clone())).await;
        if self.fail_update.lock().unwrap().contains(&id) {
            return Err(server_error());
        }
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| TodoApiError::NotFound {
                message: format!("todo {id}"),
            })?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: u64) -> Result<()> {
        self.enter(Call::Delete(id)).await;
        if self.fail_delete.lock().unwrap().contains(&id) {
            return Err(server_error());
        }
        self.tasks.lock().unwrap().retain(|task| task.id != id);
        Ok(())
    }
}

pub fn task(id: u64, title: &str, completed: bool) -> Task {
    Task {
        id,
        title: title.to_string(),
        completed,
        user_id: OWNER,
    }
}

pub fn owner() -> NonZeroU64 {
    NonZeroU64::new(OWNER).unwrap()
}

/// Store over `api` with the initial load already applied
pub async fn loaded_store(api: Arc<FakeApi>) -> TaskStore {
    let store = TaskStore::new(api, StoreConfig::new(owner()));
    store.load().await;
    store
}

/// Wait until the store publishes a state matching `predicate`
pub async fn wait_for(
    rx: &mut watch::Receiver<StoreState>,
    predicate: impl FnMut(&StoreState) -> bool,
) -> StoreState {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(predicate))
        .await
        .expect("state condition not reached in time")
        .expect("store dropped")
        .clone()
}
