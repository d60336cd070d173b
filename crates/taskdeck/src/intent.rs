/*
[INPUT]:  User intents emitted by the presentation layer
[OUTPUT]: Calls into TaskStore; async operations spawned as their own tasks
[POS]:    Glue between key handling and the store controller
[UPDATE]: When an intent or controller operation is added
*/

use std::future::Future;

use taskdeck_adapter::TaskPatch;
use tokio::task::JoinHandle;

use crate::store::{Filter, TaskStore};

/// Everything the UI can ask the store to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ChangeTitle(String),
    SubmitNew(String),
    Delete(u64),
    Update(u64, TaskPatch),
    Toggle(u64),
    StartEdit(u64),
    SaveEdit {
        id: u64,
        new_title: String,
        old_title: String,
    },
    CancelEdit,
    ChangeFilter(Filter),
    ClearCompleted,
    ToggleAll,
    DismissError,
}

impl Intent {
    /// Apply the intent.
    ///
    /// Local-only intents take effect before this returns. Intents that
    /// talk to the server are spawned, and the handle is returned so
    /// callers may await the outcome. Requires a tokio runtime.
    pub fn dispatch(self, store: &TaskStore) -> Option<JoinHandle<()>> {
        match self {
            Intent::ChangeTitle(title) => {
                store.set_new_title(&title);
                None
            }
            Intent::StartEdit(id) => {
                store.start_edit(id);
                None
            }
            Intent::CancelEdit => {
                store.cancel_edit();
                None
            }
            Intent::ChangeFilter(filter) => {
                store.set_filter(filter);
                None
            }
            Intent::DismissError => {
                store.dismiss_error();
                None
            }
            Intent::SubmitNew(title) => Some(spawn_op(store, |store| async move {
                store.add(&title).await;
            })),
            Intent::Delete(id) => Some(spawn_op(store, move |store| async move {
                store.delete(id).await;
            })),
            Intent::Update(id, patch) => Some(spawn_op(store, move |store| async move {
                store.update(id, patch).await;
            })),
            Intent::Toggle(id) => Some(spawn_op(store, move |store| async move {
                store.toggle(id).await;
            })),
            Intent::SaveEdit {
                id,
                new_title,
                old_title,
            } => Some(spawn_op(store, move |store| async move {
                store.save_edit(id, &new_title, &old_title).await;
            })),
            Intent::ClearCompleted => Some(spawn_op(store, |store| async move {
                store.clear_completed().await;
            })),
            Intent::ToggleAll => Some(spawn_op(store, |store| async move {
                store.toggle_all().await;
            })),
        }
    }
}

fn spawn_op<F, Fut>(store: &TaskStore, op: F) -> JoinHandle<()>
where
    F: FnOnce(TaskStore) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(op(store.clone()))
}
