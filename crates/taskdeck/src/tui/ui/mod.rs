/*
[INPUT]:  UiState and StoreState snapshots for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When a panel is added or removed
*/

mod footer;
mod header;
mod logs;
mod notification;
mod task_list;
mod warning;

pub(in crate::tui) use footer::draw_todo_footer;
pub(in crate::tui) use header::draw_header;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use notification::draw_error;
pub(in crate::tui) use task_list::draw_task_list;
pub(in crate::tui) use warning::draw_missing_owner;

/// Rows of a rendered buffer as plain text
#[cfg(test)]
pub(in crate::tui) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
