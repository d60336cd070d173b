/*
[INPUT]:  TaskStore state channel, terminal key events, and log buffer
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::{Mutex as StdMutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use super::app::{Focus, UiState};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::*;
use crate::store::{StoreState, TaskStore};

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// `MakeWriter` that feeds complete lines into a shared `LogBuffer`
#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        let mut guard = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        guard.push_line(line);
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = String::from_utf8_lossy(buf);
        self.partial.push_str(&chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

fn spawn_input_reader(shutdown: CancellationToken) -> mpsc::UnboundedReceiver<UiEvent> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !shutdown.is_cancelled() {
            if event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });
    event_rx
}

/// Run the task list UI until the user quits.
///
/// The initial load is started here; every redraw reads a fresh snapshot
/// from the store's state channel.
pub async fn run_tui(store: TaskStore, log_buffer: LogBufferHandle) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let input_shutdown = CancellationToken::new();
    let _input_guard = input_shutdown.clone().drop_guard();
    let mut event_rx = spawn_input_reader(input_shutdown);

    let mut state_rx = store.subscribe();
    let mut app = UiState::new(log_buffer);

    tracing::info!(owner_id = store.owner_id(), "loading tasks");
    let loader = {
        let store = store.clone();
        tokio::spawn(async move { store.load().await })
    };

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        let state = state_rx.borrow_and_update().clone();
        app.sync(&state);
        terminal.draw(|frame| draw_ui(frame, &mut app, &state))?;

        tokio::select! {
            _ = tick.tick() => {}
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        let outcome = handle_key_event(&mut app, &state, key);
                        for intent in outcome.intents {
                            tracing::debug!(?intent, "dispatch intent");
                            intent.dispatch(&store);
                        }
                        should_quit = outcome.quit;
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }

    loader.abort();
    tracing::info!("tui exited");
    Ok(())
}

/// Static screen shown when no owner id is configured
pub async fn run_missing_owner() -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let input_shutdown = CancellationToken::new();
    let _input_guard = input_shutdown.clone().drop_guard();
    let mut event_rx = spawn_input_reader(input_shutdown);

    loop {
        terminal.draw(draw_missing_owner)?;
        match event_rx.recv().await {
            Some(UiEvent::Input(CrosstermEvent::Key(key))) => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
            Some(_) => {}
            None => break,
        }
    }

    Ok(())
}

pub(super) fn draw_ui(frame: &mut ratatui::Frame, app: &mut UiState, state: &StoreState) {
    let area = frame.area();
    let (main, logs) = if app.show_logs {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (columns[0], Some(columns[1]))
    } else {
        (area, None)
    };

    let error_height = if state.error.is_some() { 3 } else { 0 };
    let footer_height = if state.tasks.is_empty() { 0 } else { 3 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(error_height),
            Constraint::Min(3),
            Constraint::Length(footer_height),
            Constraint::Length(3),
        ])
        .split(main);

    draw_header(frame, layout[0], app, state);
    if let Some(error) = state.error {
        draw_error(frame, layout[1], error);
    }
    draw_task_list(frame, layout[2], app, state);
    if !state.tasks.is_empty() {
        draw_todo_footer(frame, layout[3], state);
    }
    draw_hotkeys(frame, layout[4], app);

    if let Some(logs) = logs {
        draw_logs(frame, logs, &app.log_buffer);
    }
}

fn draw_hotkeys(frame: &mut ratatui::Frame, area: Rect, app: &UiState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let bindings: &[(&str, &str)] = match (app.edit.is_some(), app.focus) {
        (true, _) => &[
            ("[Enter]", " Save  "),
            ("[Esc]", " Cancel  "),
            ("[Up/Down/Tab]", " Save & move"),
        ],
        (false, Focus::NewTodo) => &[
            ("[Enter]", " Add  "),
            ("[Tab/Down]", " List  "),
            ("[Ctrl-C]", " Quit"),
        ],
        (false, Focus::List) => &[
            ("[Space]", " Toggle  "),
            ("[e]", " Edit  "),
            ("[d]", " Delete  "),
            ("[a]", " All  "),
            ("[c]", " Clear  "),
            ("[f/1-3]", " Filter  "),
            ("[x/Esc]", " Dismiss  "),
            ("[l]", " Logs  "),
            ("[q]", " Quit"),
        ],
    };

    let spans = bindings
        .iter()
        .flat_map(|(key, label)| [Span::styled(*key, key_style), Span::raw(*label)])
        .collect::<Vec<_>>();
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Hotkeys"),
    );
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}
