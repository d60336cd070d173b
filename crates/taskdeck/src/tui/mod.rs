/*
[INPUT]:  TaskStore snapshots, key events, and log buffer
[OUTPUT]: Ratatui-based TUI for the task list, logs, and controls
[POS]:    TUI module for the taskdeck binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{
    LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_missing_owner, run_tui,
};
