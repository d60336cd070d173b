/*
[INPUT]:  Arc<dyn TaskApi>, configured owner id, user intents
[OUTPUT]: Optimistic StoreState updates published over a watch channel
[POS]:    Store layer - controller reconciling local state with the remote collection
[UPDATE]: When operations, rollback rules, or cleanup guarantees change
*/

use std::collections::HashSet;
use std::num::NonZeroU64;
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures_util::future::join_all;
use taskdeck_adapter::{DRAFT_TASK_ID, NewTask, Task, TaskApi, TaskPatch};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::filter::Filter;
use super::notice::{DEFAULT_ERROR_DISMISS, DismissTimer, ErrorMessage};
use super::state::{EditSession, StoreState};

/// Construction-time settings for the store
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    pub owner_id: NonZeroU64,
    pub error_dismiss: Duration,
}

impl StoreConfig {
    pub fn new(owner_id: NonZeroU64) -> Self {
        Self {
            owner_id,
            error_dismiss: DEFAULT_ERROR_DISMISS,
        }
    }
}

struct Inner {
    api: Arc<dyn TaskApi>,
    owner_id: u64,
    state: watch::Sender<StoreState>,
    dismiss: DismissTimer,
}

/// Task list controller.
///
/// Every state change is one `send_modify` that never spans an `.await`,
/// so subscribers only ever observe whole snapshots. Cloning is cheap and
/// clones share state, which lets each operation run as its own task.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("owner_id", &self.inner.owner_id)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl TaskStore {
    pub fn new(api: Arc<dyn TaskApi>, config: StoreConfig) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            inner: Arc::new(Inner {
                api,
                owner_id: config.owner_id.get(),
                state,
                dismiss: DismissTimer::new(config.error_dismiss),
            }),
        }
    }

    pub fn owner_id(&self) -> u64 {
        self.inner.owner_id
    }

    /// Receiver that is notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState {
        self.inner.state.borrow().clone()
    }

    fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    fn modify(&self, f: impl FnOnce(&mut StoreState)) {
        self.inner.state.send_modify(f);
    }

    fn mark_pending(&self, ids: Vec<u64>) -> PendingGuard<'_> {
        self.modify(|state| state.pending.extend(ids.iter().copied()));
        PendingGuard {
            store: self,
            ids,
            refocus: false,
        }
    }

    /// Replace the task list with the owner's tasks from the server
    pub async fn load(&self) {
        let owner_id = self.inner.owner_id;
        match self.inner.api.list_tasks(owner_id).await {
            Ok(tasks) => {
                info!(owner_id, count = tasks.len(), "tasks loaded");
                self.modify(|state| {
                    state.tasks = tasks;
                    state.loaded = true;
                });
            }
            Err(err) => {
                warn!(
                    owner_id,
                    error = %err,
                    retryable = err.is_retryable(),
                    "loading tasks failed"
                );
                self.modify(|state| state.loaded = true);
                self.set_error(ErrorMessage::Load);
            }
        }
    }

    pub fn set_new_title(&self, title: &str) {
        self.inner.state.send_if_modified(|state| {
            if state.new_title == title {
                return false;
            }
            state.new_title = title.to_string();
            true
        });
    }

    /// Create a task from `title` with a draft row shown while in flight.
    ///
    /// Returns whether a task was created. Ignored while another add is
    /// in flight.
    pub async fn add(&self, title: &str) -> bool {
        if self.read(|state| state.add_disabled) {
            debug!("add ignored while another add is in flight");
            return false;
        }

        let trimmed = title.trim();
        if trimmed.is_empty() {
            self.set_error(ErrorMessage::Empty);
            return false;
        }

        let draft = Task::draft(trimmed, self.inner.owner_id);
        let body = NewTask::from(&draft);
        let claimed = self.inner.state.send_if_modified(|state| {
            if state.add_disabled {
                return false;
            }
            state.draft = Some(draft);
            state.add_disabled = true;
            true
        });
        if !claimed {
            return false;
        }
        let _draft = DraftGuard { store: self };

        match self.inner.api.create_task(&body).await {
            Ok(saved) => {
                info!(id = saved.id, "task added");
                self.modify(|state| {
                    state.tasks.push(saved);
                    state.draft = None;
                    state.new_title.clear();
                });
                true
            }
            Err(err) => {
                warn!(error = %err, retryable = err.is_retryable(), "adding task failed");
                self.set_error(ErrorMessage::Add);
                false
            }
        }
    }

    /// Delete one task. Returns whether it was removed.
    pub async fn delete(&self, id: u64) -> bool {
        if id == DRAFT_TASK_ID {
            debug!("delete ignored for draft task");
            return false;
        }

        let _pending = self.mark_pending(vec![id]).refocus_add_input();
        match self.inner.api.delete_task(id).await {
            Ok(()) => {
                info!(id, "task deleted");
                self.modify(|state| state.tasks.retain(|task| task.id != id));
                true
            }
            Err(err) => {
                warn!(id, error = %err, retryable = err.is_retryable(), "deleting task failed");
                self.set_error(ErrorMessage::Delete);
                false
            }
        }
    }

    /// Send the changed fields and adopt the server's copy of the task.
    /// Returns whether the update was applied.
    pub async fn update(&self, id: u64, patch: TaskPatch) -> bool {
        if id == DRAFT_TASK_ID {
            debug!("update ignored for draft task");
            return false;
        }
        if patch.is_empty() {
            return true;
        }

        let _pending = self.mark_pending(vec![id]);
        match self.inner.api.update_task(id, &patch).await {
            Ok(updated) => {
                debug!(id, "task updated");
                self.modify(|state| {
                    if let Some(slot) = state.tasks.iter_mut().find(|task| task.id == id) {
                        *slot = updated;
                    }
                });
                true
            }
            Err(err) => {
                warn!(id, error = %err, retryable = err.is_retryable(), "updating task failed");
                self.set_error(ErrorMessage::Update);
                false
            }
        }
    }

    /// Flip one task's completion flag
    pub async fn toggle(&self, id: u64) -> bool {
        let Some(completed) = self.read(|state| state.task(id).map(|task| task.completed)) else {
            debug!(id, "toggle ignored for unknown task");
            return false;
        };
        self.update(id, TaskPatch::completed(!completed)).await
    }

    /// Delete every completed task, keeping whichever deletes failed
    pub async fn clear_completed(&self) {
        let targets: Vec<u64> = self.read(|state| {
            state
                .tasks
                .iter()
                .filter(|task| task.completed)
                .map(|task| task.id)
                .collect()
        });
        if targets.is_empty() {
            return;
        }

        let _pending = self.mark_pending(targets.clone()).refocus_add_input();
        let api = &self.inner.api;
        let outcomes = join_all(
            targets
                .iter()
                .map(|&id| async move { (id, api.delete_task(id).await) }),
        )
        .await;

        let mut deleted = HashSet::new();
        let mut failed = 0usize;
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => {
                    deleted.insert(id);
                }
                Err(err) => {
                    warn!(
                        id,
                        error = %err,
                        retryable = err.is_retryable(),
                        "deleting completed task failed"
                    );
                    failed += 1;
                }
            }
        }

        info!(deleted = deleted.len(), failed, "cleared completed tasks");
        if !deleted.is_empty() {
            self.modify(|state| state.tasks.retain(|task| !deleted.contains(&task.id)));
        }
        if failed > 0 {
            self.set_error(ErrorMessage::Delete);
        }
    }

    /// Complete everything, or un-complete everything when all are done.
    ///
    /// Local state changes only if every update succeeds.
    pub async fn toggle_all(&self) {
        let (target, selected) = self.read(|state| {
            let target = !state.all_completed();
            let selected: Vec<u64> = state
                .tasks
                .iter()
                .filter(|task| task.completed != target)
                .map(|task| task.id)
                .collect();
            (target, selected)
        });
        if selected.is_empty() {
            return;
        }

        let _pending = self.mark_pending(selected.clone());
        let api = &self.inner.api;
        let patch = TaskPatch::completed(target);
        let patch = &patch;
        let outcomes = join_all(
            selected
                .iter()
                .map(|&id| async move { (id, api.update_task(id, patch).await) }),
        )
        .await;

        let mut failed = 0usize;
        for (id, outcome) in &outcomes {
            if let Err(err) = outcome {
                warn!(id, error = %err, retryable = err.is_retryable(), "toggling task failed");
                failed += 1;
            }
        }

        if failed > 0 {
            self.set_error(ErrorMessage::Update);
            return;
        }

        info!(count = selected.len(), completed = target, "toggled all tasks");
        let selected: HashSet<u64> = selected.into_iter().collect();
        self.modify(|state| {
            for task in state.tasks.iter_mut() {
                if selected.contains(&task.id) {
                    task.completed = target;
                }
            }
        });
    }

    /// Enter inline edit mode, leaving any other edit silently
    pub fn start_edit(&self, id: u64) {
        self.inner.state.send_if_modified(|state| {
            if id == DRAFT_TASK_ID || state.task(id).is_none() {
                return false;
            }
            state.editing = Some(EditSession::new(id));
            true
        });
    }

    /// Commit an inline edit.
    ///
    /// Empty titles delete the task, changed titles update it, unchanged
    /// titles just leave edit mode. Failures keep the task in edit mode.
    /// Returns whether edit mode was left.
    pub async fn save_edit(&self, id: u64, new_title: &str, old_title: &str) -> bool {
        let claimed = self.inner.state.send_if_modified(|state| match state.editing.as_mut() {
            Some(session) if session.id == id && !session.saving => {
                session.saving = true;
                true
            }
            _ => false,
        });
        if !claimed {
            debug!(id, "save ignored: no idle edit session for task");
            return false;
        }

        let trimmed = new_title.trim();
        let resolved = if trimmed.is_empty() {
            self.delete(id).await
        } else if trimmed != old_title {
            self.update(id, TaskPatch::title(trimmed)).await
        } else {
            true
        };

        self.modify(|state| {
            if state.editing_id() != Some(id) {
                return;
            }
            if resolved {
                state.editing = None;
            } else if let Some(session) = state.editing.as_mut() {
                session.saving = false;
            }
        });
        resolved
    }

    /// Leave edit mode without saving
    pub fn cancel_edit(&self) {
        self.inner.state.send_if_modified(|state| state.editing.take().is_some());
    }

    pub fn set_filter(&self, filter: Filter) {
        self.inner.state.send_if_modified(|state| {
            if state.filter == filter {
                return false;
            }
            state.filter = filter;
            true
        });
    }

    /// Show `message` and restart the dismiss clock
    pub fn set_error(&self, message: ErrorMessage) {
        let mut generation = 0;
        self.modify(|state| {
            state.error = Some(message);
            state.error_generation += 1;
            generation = state.error_generation;
        });

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.dismiss.restart(move || {
            if let Some(inner) = inner.upgrade() {
                inner.state.send_if_modified(|state| {
                    if state.error_generation != generation || state.error.is_none() {
                        return false;
                    }
                    state.error = None;
                    true
                });
            }
        });
    }

    /// Hide the current error right away
    pub fn dismiss_error(&self) {
        self.inner.dismiss.cancel();
        self.modify(|state| {
            state.error = None;
            state.error_generation += 1;
        });
    }
}

/// Unmarks pending ids when the operation settles, including on cancellation
struct PendingGuard<'a> {
    store: &'a TaskStore,
    ids: Vec<u64>,
    refocus: bool,
}

impl PendingGuard<'_> {
    fn refocus_add_input(mut self) -> Self {
        self.refocus = true;
        self
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let ids = std::mem::take(&mut self.ids);
        let refocus = self.refocus;
        self.store.modify(|state| {
            for id in &ids {
                state.pending.remove(id);
            }
            if refocus {
                state.add_focus += 1;
            }
        });
    }
}

/// Clears the draft and re-enables the add input once the create settles
struct DraftGuard<'a> {
    store: &'a TaskStore,
}

impl Drop for DraftGuard<'_> {
    fn drop(&mut self) {
        self.store.modify(|state| {
            state.draft = None;
            state.add_disabled = false;
            state.add_focus += 1;
        });
    }
}
