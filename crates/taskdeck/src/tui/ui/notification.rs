/*
[INPUT]:  Current ErrorMessage
[OUTPUT]: Error notification banner with its dismiss hint
[POS]:    TUI UI error notification
[UPDATE]: When error presentation changes
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::store::ErrorMessage;

pub(in crate::tui) fn draw_error(frame: &mut ratatui::Frame, area: Rect, error: ErrorMessage) {
    let line = Line::from(vec![
        Span::styled(
            error.text(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [Esc] hide", Style::default().fg(Color::DarkGray)),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Error"),
    );
    frame.render_widget(widget, area);
}
