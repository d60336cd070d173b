/*
[INPUT]:  Frame only
[OUTPUT]: Static screen asking for an owner id
[POS]:    TUI UI missing-owner warning
[UPDATE]: When owner configuration options change
*/

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_missing_owner(frame: &mut ratatui::Frame) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Fill(1),
        ])
        .split(frame.area());

    let text = Text::from(vec![
        Line::from(Span::styled(
            "Please set an owner id to use the app",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("Set owner_id in the config file, pass --owner-id,"),
        Line::from("or export TASKDECK_OWNER_ID."),
        Line::default(),
        Line::from(Span::styled("[q] Quit", Style::default().fg(Color::DarkGray))),
    ]);
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("todos"),
        );
    frame.render_widget(widget, rows[1]);
}
