/*
[INPUT]:  StoreState counts and selected filter
[OUTPUT]: Items-left counter, filter links, and clear-completed control
[POS]:    TUI UI list footer
[UPDATE]: When footer controls change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::store::{Filter, StoreState};
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_todo_footer(frame: &mut ratatui::Frame, area: Rect, state: &StoreState) {
    let mut spans = vec![Span::raw(format!("{} items left", state.active_count())), Span::raw("   ")];

    for filter in Filter::ALL {
        let style = if filter == state.filter {
            header_style()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }

    let clear_style = if state.has_completed() {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled("Clear completed", clear_style));

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use taskdeck_adapter::Task;

    use super::*;
    use crate::tui::ui::buffer_text;

    fn render(state: &StoreState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(70, 3)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_todo_footer(frame, area, state);
            })
            .expect("draw");
        terminal
    }

    fn find(text: &str, needle: &str) -> u16 {
        let line = text.lines().nth(1).expect("content row");
        let byte = line.find(needle).expect("needle present");
        line[..byte].chars().count() as u16
    }

    fn state(completed: &[bool], filter: Filter) -> StoreState {
        StoreState {
            tasks: completed
                .iter()
                .enumerate()
                .map(|(index, completed)| Task {
                    id: index as u64 + 1,
                    title: format!("t{index}"),
                    completed: *completed,
                    user_id: 1,
                })
                .collect(),
            filter,
            loaded: true,
            ..StoreState::default()
        }
    }

    #[test]
    fn test_counts_active_items() {
        let terminal = render(&state(&[true, false, false], Filter::All));
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("2 items left"));
    }

    #[test]
    fn test_selected_filter_is_highlighted() {
        let terminal = render(&state(&[false], Filter::Active));
        let text = buffer_text(terminal.backend().buffer());
        let buffer = terminal.backend().buffer();

        let active = find(&text, "Active");
        let all = find(&text, "All");
        assert_eq!(buffer[(active, 1)].bg, Color::Cyan);
        assert_ne!(buffer[(all, 1)].bg, Color::Cyan);
    }

    #[test]
    fn test_clear_completed_disabled_without_completed_tasks() {
        let terminal = render(&state(&[false], Filter::All));
        let text = buffer_text(terminal.backend().buffer());
        let x = find(&text, "Clear completed");
        assert_eq!(terminal.backend().buffer()[(x, 1)].fg, Color::DarkGray);

        let terminal = render(&state(&[true], Filter::All));
        assert_eq!(terminal.backend().buffer()[(x, 1)].fg, Color::LightRed);
    }
}
