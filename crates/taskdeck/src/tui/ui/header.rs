/*
[INPUT]:  UiState focus and StoreState new-title/add/toggle data
[OUTPUT]: "todos" header with toggle-all indicator and new task input
[POS]:    TUI UI header rendering
[UPDATE]: When the add input or toggle-all control changes
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::store::StoreState;
use crate::tui::app::{Focus, UiState};
use crate::tui::runtime::{border_style, focused_border_style};

const TOGGLE_ALL: &str = "▾ ";
const PLACEHOLDER: &str = "What needs to be done?";

pub(in crate::tui) fn draw_header(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &UiState,
    state: &StoreState,
) {
    let focused = app.focus == Focus::NewTodo && app.edit.is_none();

    let toggle = if state.tasks.is_empty() {
        Span::raw(" ".repeat(TOGGLE_ALL.width()))
    } else if state.all_completed() {
        Span::styled(
            TOGGLE_ALL,
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(TOGGLE_ALL, Style::default().fg(Color::DarkGray))
    };

    let input = if state.new_title.is_empty() {
        Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else if state.add_disabled {
        Span::styled(state.new_title.as_str(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.new_title.as_str())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title("todos");
    let widget = Paragraph::new(Line::from(vec![toggle, input])).block(block);
    frame.render_widget(widget, area);

    if focused && !state.add_disabled {
        let offset = (TOGGLE_ALL.width() + state.new_title.width()) as u16;
        let x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}
