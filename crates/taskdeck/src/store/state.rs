/*
[INPUT]:  Committed tasks plus in-flight markers (draft, pending ids, edit session)
[OUTPUT]: StoreState snapshot and the derived views the UI renders from
[POS]:    Store layer - state model
[UPDATE]: When new state fields or derived views are added
*/

use std::collections::BTreeSet;

use taskdeck_adapter::Task;

use super::filter::Filter;
use super::notice::ErrorMessage;

/// Inline edit of one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSession {
    pub id: u64,
    /// Set while a save for this session is in flight; a second save is ignored
    pub saving: bool,
}

impl EditSession {
    pub fn new(id: u64) -> Self {
        Self { id, saving: false }
    }
}

/// Everything the presentation layer needs, published as one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Server order, newly added tasks appended
    pub tasks: Vec<Task>,
    /// Present only while an add is in flight
    pub draft: Option<Task>,
    /// Ids with an update or delete in flight
    pub pending: BTreeSet<u64>,
    pub filter: Filter,
    pub editing: Option<EditSession>,
    pub error: Option<ErrorMessage>,
    pub(crate) error_generation: u64,
    /// Contents of the add input
    pub new_title: String,
    pub add_disabled: bool,
    /// Bumped whenever focus should go back to the add input
    pub add_focus: u64,
    /// Initial load has settled, successfully or not
    pub loaded: bool,
}

impl StoreState {
    /// Tasks plus the draft, projected through the active filter
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter
            .apply(self.tasks.iter().chain(self.draft.as_ref()))
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn is_pending(&self, id: u64) -> bool {
        self.pending.contains(&id)
    }

    /// Controls for this row are disabled and its loader shows
    pub fn is_busy(&self, task: &Task) -> bool {
        task.is_draft() || self.is_pending(task.id)
    }

    pub fn editing_id(&self) -> Option<u64> {
        self.editing.map(|session| session.id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    /// False for an empty list
    pub fn all_completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|task| task.completed)
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }
}
