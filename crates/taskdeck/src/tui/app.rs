/*
[INPUT]:  StoreState snapshots and the log buffer handle
[OUTPUT]: UI-local state (focus, selection, edit buffer, panels)
[POS]:    TUI app state kept beside the store snapshot
[UPDATE]: When adding UI-only state such as new panels or focus targets
*/

use ratatui::widgets::ListState;

use crate::store::StoreState;
use crate::tui::LogBufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    NewTodo,
    List,
}

/// Text of the inline edit field for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditBuffer {
    pub(crate) id: u64,
    pub(crate) text: String,
    pub(crate) original: String,
}

pub(crate) struct UiState {
    pub(crate) focus: Focus,
    pub(crate) list_state: ListState,
    pub(crate) edit: Option<EditBuffer>,
    pub(crate) show_logs: bool,
    pub(crate) log_buffer: LogBufferHandle,
    seen_add_focus: u64,
}

impl UiState {
    pub(crate) fn new(log_buffer: LogBufferHandle) -> Self {
        Self {
            focus: Focus::NewTodo,
            list_state: ListState::default(),
            edit: None,
            show_logs: false,
            log_buffer,
            seen_add_focus: 0,
        }
    }

    /// Reconcile UI-only state with the latest store snapshot
    pub(crate) fn sync(&mut self, state: &StoreState) {
        // A save that deletes the task ends the edit and asks for focus in one snapshot
        if let Some(edit) = self.edit.as_ref() {
            if state.editing_id() != Some(edit.id) {
                self.edit = None;
            }
        }

        if state.add_focus != self.seen_add_focus {
            self.seen_add_focus = state.add_focus;
            if self.edit.is_none() {
                self.focus = Focus::NewTodo;
            }
        }

        let len = state.visible_tasks().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(selected) if selected >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub(crate) fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.list_state.select(Some(next as usize));
    }

    pub(crate) fn begin_edit(&mut self, id: u64, title: &str) {
        self.edit = Some(EditBuffer {
            id,
            text: title.to_string(),
            original: title.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use taskdeck_adapter::Task;

    use super::*;
    use crate::tui::LogBuffer;

    fn ui() -> UiState {
        UiState::new(Arc::new(Mutex::new(LogBuffer::new(16))))
    }

    fn state_with(count: u64) -> StoreState {
        StoreState {
            tasks: (1..=count)
                .map(|id| Task {
                    id,
                    title: format!("t{id}"),
                    completed: false,
                    user_id: 1,
                })
                .collect(),
            ..StoreState::default()
        }
    }

    #[test]
    fn test_selection_clamps_to_visible_rows() {
        let mut ui = ui();
        ui.sync(&state_with(3));
        assert_eq!(ui.selected_index(), Some(0));

        ui.move_selection(5, 3);
        assert_eq!(ui.selected_index(), Some(2));

        ui.sync(&state_with(2));
        assert_eq!(ui.selected_index(), Some(1));

        ui.sync(&state_with(0));
        assert_eq!(ui.selected_index(), None);
    }

    #[test]
    fn test_focus_request_returns_to_input() {
        let mut ui = ui();
        ui.focus = Focus::List;

        let mut state = state_with(1);
        ui.sync(&state);
        assert_eq!(ui.focus, Focus::List);

        state.add_focus += 1;
        ui.sync(&state);
        assert_eq!(ui.focus, Focus::NewTodo);
    }

    #[test]
    fn test_edit_buffer_dropped_when_store_leaves_edit_mode() {
        let mut ui = ui();
        ui.begin_edit(1, "t1");

        let mut state = state_with(1);
        state.editing = Some(crate::store::EditSession::new(1));
        ui.sync(&state);
        assert!(ui.edit.is_some());

        state.editing = None;
        ui.sync(&state);
        assert!(ui.edit.is_none());
    }

    #[test]
    fn test_blank_title_save_returns_focus_to_input() {
        let mut ui = ui();
        ui.focus = Focus::List;
        ui.begin_edit(1, "t1");

        let mut state = state_with(2);
        state.editing = Some(crate::store::EditSession::new(1));
        ui.sync(&state);
        assert_eq!(ui.focus, Focus::List);

        state.tasks.retain(|task| task.id != 1);
        state.add_focus += 1;
        state.editing = None;
        ui.sync(&state);

        assert!(ui.edit.is_none());
        assert_eq!(ui.focus, Focus::NewTodo);
    }

    #[test]
    fn test_focus_request_waits_while_edit_stays_open() {
        let mut ui = ui();
        ui.focus = Focus::List;
        ui.begin_edit(2, "t2");

        let mut state = state_with(2);
        state.editing = Some(crate::store::EditSession::new(2));
        state.add_focus += 1;
        ui.sync(&state);

        assert!(ui.edit.is_some());
        assert_eq!(ui.focus, Focus::List);
    }
}
