/*
[INPUT]:  StoreState visible tasks, pending set, edit session, UiState selection
[OUTPUT]: Task list rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When row content or busy indicators change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph};
use taskdeck_adapter::Task;

use crate::store::{Filter, StoreState};
use crate::tui::app::{EditBuffer, Focus, UiState};
use crate::tui::runtime::{border_style, focused_border_style};

const BUSY_MARKER: &str = " ⟳";

pub(in crate::tui) fn draw_task_list(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &mut UiState,
    state: &StoreState,
) {
    let focused = app.focus == Focus::List || app.edit.is_some();
    let title = match state.filter {
        Filter::All => "Tasks".to_string(),
        filter => format!("Tasks ({})", filter.label()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title(title);

    if !state.loaded {
        let widget = Paragraph::new(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let editing = app
        .edit
        .as_ref()
        .filter(|edit| state.editing_id() == Some(edit.id));
    let items = state
        .visible_tasks()
        .into_iter()
        .map(|task| ListItem::new(task_line(task, state, editing)))
        .collect::<Vec<_>>();

    let highlight = if focused {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(if focused { "> " } else { "  " })
        .highlight_spacing(HighlightSpacing::Always);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn task_line<'a>(task: &'a Task, state: &StoreState, editing: Option<&'a EditBuffer>) -> Line<'a> {
    let busy = state.is_busy(task);
    let muted = Style::default().fg(Color::DarkGray);

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let mut spans = vec![Span::styled(
        checkbox,
        if busy { muted } else { Style::default() },
    )];

    match editing {
        Some(edit) if edit.id == task.id => {
            spans.push(Span::styled(
                edit.text.as_str(),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        _ if task.completed => spans.push(Span::styled(
            task.title.as_str(),
            muted.add_modifier(Modifier::CROSSED_OUT),
        )),
        _ => spans.push(Span::raw(task.title.as_str())),
    }

    if busy {
        spans.push(Span::styled(BUSY_MARKER, Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}
