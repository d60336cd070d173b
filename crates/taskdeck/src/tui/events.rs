/*
[INPUT]:  Crossterm key events, UiState, current StoreState snapshot
[OUTPUT]: Intents for the store plus UI-local focus/selection changes
[POS]:    TUI key routing
[UPDATE]: When keybindings change
*/

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{Focus, UiState};
use crate::intent::Intent;
use crate::store::{Filter, StoreState};

/// What a key press asks of the runtime
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct KeyOutcome {
    pub(crate) intents: Vec<Intent>,
    pub(crate) quit: bool,
}

impl KeyOutcome {
    fn quit() -> Self {
        Self {
            intents: Vec::new(),
            quit: true,
        }
    }

    fn intent(intent: Intent) -> Self {
        Self {
            intents: vec![intent],
            quit: false,
        }
    }
}

pub(crate) fn handle_key_event(app: &mut UiState, state: &StoreState, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::quit();
    }

    if app.edit.is_some() {
        return handle_edit_key(app, state, key.code);
    }

    match app.focus {
        Focus::NewTodo => handle_input_key(app, state, key.code),
        Focus::List => handle_list_key(app, state, key.code),
    }
}

fn handle_input_key(app: &mut UiState, state: &StoreState, key: KeyCode) -> KeyOutcome {
    match key {
        KeyCode::Char(c) if !state.add_disabled => {
            let mut title = state.new_title.clone();
            title.push(c);
            KeyOutcome::intent(Intent::ChangeTitle(title))
        }
        KeyCode::Backspace if !state.add_disabled => {
            let mut title = state.new_title.clone();
            title.pop();
            KeyOutcome::intent(Intent::ChangeTitle(title))
        }
        KeyCode::Enter if !state.add_disabled => {
            KeyOutcome::intent(Intent::SubmitNew(state.new_title.clone()))
        }
        KeyCode::Esc if state.error.is_some() => KeyOutcome::intent(Intent::DismissError),
        KeyCode::Esc | KeyCode::Tab | KeyCode::Down => {
            app.focus = Focus::List;
            KeyOutcome::default()
        }
        _ => KeyOutcome::default(),
    }
}

fn handle_list_key(app: &mut UiState, state: &StoreState, key: KeyCode) -> KeyOutcome {
    let visible = state.visible_tasks();
    let selected = app.selected_index().and_then(|index| visible.get(index).copied());

    match key {
        KeyCode::Char('q') => KeyOutcome::quit(),
        KeyCode::Tab | KeyCode::Char('i') => {
            app.focus = Focus::NewTodo;
            KeyOutcome::default()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.selected_index().unwrap_or(0) == 0 {
                app.focus = Focus::NewTodo;
            } else {
                app.move_selection(-1, visible.len());
            }
            KeyOutcome::default()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection(1, visible.len());
            KeyOutcome::default()
        }
        KeyCode::Char(' ') => match selected {
            Some(task) if !state.is_busy(task) => KeyOutcome::intent(Intent::Toggle(task.id)),
            _ => KeyOutcome::default(),
        },
        KeyCode::Char('d') | KeyCode::Delete => match selected {
            Some(task) if !state.is_busy(task) => KeyOutcome::intent(Intent::Delete(task.id)),
            _ => KeyOutcome::default(),
        },
        KeyCode::Char('e') | KeyCode::Enter => match selected {
            Some(task) if !task.is_draft() => {
                app.begin_edit(task.id, &task.title);
                KeyOutcome::intent(Intent::StartEdit(task.id))
            }
            _ => KeyOutcome::default(),
        },
        KeyCode::Char('a') if !state.tasks.is_empty() => KeyOutcome::intent(Intent::ToggleAll),
        KeyCode::Char('c') if state.has_completed() => {
            KeyOutcome::intent(Intent::ClearCompleted)
        }
        KeyCode::Char('1') => KeyOutcome::intent(Intent::ChangeFilter(Filter::All)),
        KeyCode::Char('2') => KeyOutcome::intent(Intent::ChangeFilter(Filter::Active)),
        KeyCode::Char('3') => KeyOutcome::intent(Intent::ChangeFilter(Filter::Completed)),
        KeyCode::Char('f') => KeyOutcome::intent(Intent::ChangeFilter(state.filter.next())),
        KeyCode::Char('x') | KeyCode::Esc if state.error.is_some() => {
            KeyOutcome::intent(Intent::DismissError)
        }
        KeyCode::Char('l') => {
            app.show_logs = !app.show_logs;
            KeyOutcome::default()
        }
        _ => KeyOutcome::default(),
    }
}

/// Enter and losing focus both save; the store ignores the second save
fn handle_edit_key(app: &mut UiState, state: &StoreState, key: KeyCode) -> KeyOutcome {
    let Some(edit) = app.edit.as_mut() else {
        return KeyOutcome::default();
    };

    match key {
        KeyCode::Char(c) => {
            edit.text.push(c);
            KeyOutcome::default()
        }
        KeyCode::Backspace => {
            edit.text.pop();
            KeyOutcome::default()
        }
        KeyCode::Esc => {
            app.edit = None;
            KeyOutcome::intent(Intent::CancelEdit)
        }
        KeyCode::Enter => KeyOutcome::intent(save_intent(edit.id, &edit.text, &edit.original)),
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            let intent = save_intent(edit.id, &edit.text, &edit.original);
            let len = state.visible_tasks().len();
            match key {
                KeyCode::Up => app.move_selection(-1, len),
                KeyCode::Down => app.move_selection(1, len),
                _ => app.focus = Focus::NewTodo,
            }
            KeyOutcome::intent(intent)
        }
        _ => KeyOutcome::default(),
    }
}

fn save_intent(id: u64, text: &str, original: &str) -> Intent {
    Intent::SaveEdit {
        id,
        new_title: text.to_string(),
        old_title: original.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ratatui::crossterm::event::KeyEvent;
    use taskdeck_adapter::Task;

    use super::*;
    use crate::store::{EditSession, ErrorMessage};
    use crate::tui::LogBuffer;

    fn ui() -> UiState {
        UiState::new(Arc::new(Mutex::new(LogBuffer::new(16))))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> StoreState {
        StoreState {
            tasks: vec![
                Task {
                    id: 1,
                    title: "one".to_string(),
                    completed: false,
                    user_id: 1,
                },
                Task {
                    id: 2,
                    title: "two".to_string(),
                    completed: true,
                    user_id: 1,
                },
            ],
            new_title: "hi".to_string(),
            ..StoreState::default()
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut app = ui();
        let state = state();

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Char('!')));
        assert_eq!(outcome.intents, vec![Intent::ChangeTitle("hi!".to_string())]);

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Enter));
        assert_eq!(outcome.intents, vec![Intent::SubmitNew("hi".to_string())]);
    }

    #[test]
    fn test_input_ignored_while_adding() {
        let mut app = ui();
        let state = StoreState {
            add_disabled: true,
            ..state()
        };

        assert!(handle_key_event(&mut app, &state, key(KeyCode::Enter)).intents.is_empty());
        assert!(handle_key_event(&mut app, &state, key(KeyCode::Char('a'))).intents.is_empty());
    }

    #[test]
    fn test_pending_row_controls_disabled() {
        let mut app = ui();
        let mut state = state();
        app.focus = Focus::List;
        app.sync(&state);

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Char(' ')));
        assert_eq!(outcome.intents, vec![Intent::Toggle(1)]);

        state.pending.insert(1);
        assert!(handle_key_event(&mut app, &state, key(KeyCode::Char(' '))).intents.is_empty());
        assert!(handle_key_event(&mut app, &state, key(KeyCode::Char('d'))).intents.is_empty());
    }

    #[test]
    fn test_draft_row_cannot_be_edited_or_deleted() {
        let mut app = ui();
        let state = StoreState {
            tasks: Vec::new(),
            draft: Some(Task::draft("pending", 1)),
            ..StoreState::default()
        };
        app.focus = Focus::List;
        app.sync(&state);

        assert!(handle_key_event(&mut app, &state, key(KeyCode::Char('e'))).intents.is_empty());
        assert!(handle_key_event(&mut app, &state, key(KeyCode::Char('d'))).intents.is_empty());
        assert!(app.edit.is_none());
    }

    #[test]
    fn test_edit_enter_then_blur_both_emit_save() {
        let mut app = ui();
        let mut state = state();
        app.focus = Focus::List;
        app.sync(&state);

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Char('e')));
        assert_eq!(outcome.intents, vec![Intent::StartEdit(1)]);
        state.editing = Some(EditSession::new(1));

        handle_key_event(&mut app, &state, key(KeyCode::Char('!')));
        let expected = Intent::SaveEdit {
            id: 1,
            new_title: "one!".to_string(),
            old_title: "one".to_string(),
        };
        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Enter));
        assert_eq!(outcome.intents, vec![expected.clone()]);

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Down));
        assert_eq!(outcome.intents, vec![expected]);
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = ui();
        let state = state();
        app.begin_edit(2, "two");

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Esc));
        assert_eq!(outcome.intents, vec![Intent::CancelEdit]);
        assert!(app.edit.is_none());
    }

    #[test]
    fn test_bulk_and_filter_keys() {
        let mut app = ui();
        let state = state();
        app.focus = Focus::List;

        assert_eq!(
            handle_key_event(&mut app, &state, key(KeyCode::Char('a'))).intents,
            vec![Intent::ToggleAll]
        );
        assert_eq!(
            handle_key_event(&mut app, &state, key(KeyCode::Char('c'))).intents,
            vec![Intent::ClearCompleted]
        );
        assert_eq!(
            handle_key_event(&mut app, &state, key(KeyCode::Char('3'))).intents,
            vec![Intent::ChangeFilter(Filter::Completed)]
        );
        assert!(handle_key_event(&mut app, &state, key(KeyCode::Char('q'))).quit);
    }

    #[test]
    fn test_error_dismissed_from_input_and_list() {
        let mut app = ui();
        let state = StoreState {
            error: Some(ErrorMessage::Empty),
            ..state()
        };

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Esc));
        assert_eq!(outcome.intents, vec![Intent::DismissError]);
        assert_eq!(app.focus, Focus::NewTodo);

        app.focus = Focus::List;
        for code in [KeyCode::Esc, KeyCode::Char('x')] {
            let outcome = handle_key_event(&mut app, &state, key(code));
            assert_eq!(outcome.intents, vec![Intent::DismissError]);
        }
    }

    #[test]
    fn test_escape_leaves_input_without_error() {
        let mut app = ui();
        let state = state();

        let outcome = handle_key_event(&mut app, &state, key(KeyCode::Esc));
        assert!(outcome.intents.is_empty());
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = ui();
        let state = state();
        let outcome = handle_key_event(
            &mut app,
            &state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(outcome.quit);
    }
}
