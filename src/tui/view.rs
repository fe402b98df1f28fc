// Renders the full frame from the current state.
//
// The whole view is rebuilt on every draw call; there is no incremental
// update path, so a render after any mutation is always consistent.
use crate::tui::state::{AppState, FormField, InputMode};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Task list
            Constraint::Length(4), // Details
            Constraint::Length(3), // Status / help
        ])
        .split(f.area());

    draw_progress(f, state, v_chunks[0]);
    draw_task_list(f, state, v_chunks[1]);
    draw_details(f, state, v_chunks[2]);
    draw_footer(f, state, v_chunks[3]);

    if state.mode != InputMode::Normal {
        draw_form_modal(f, state);
    }
}

fn draw_progress(f: &mut Frame, state: &AppState, area: Rect) {
    let percent = state.store.progress_percent();
    let label = format!(
        "{}% ({}/{})",
        percent,
        state.store.completed_count(),
        state.store.len()
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent)
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_task_list(f: &mut Frame, state: &mut AppState, area: Rect) {
    let count = state.store.len();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tasks ({}) ", count));

    if state.store.is_empty() {
        // Empty-state placeholder instead of any rows.
        let placeholder = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let show_descriptions = state.config.show_descriptions;
    let strikethrough = state.config.strikethrough_completed;

    let items: Vec<ListItem> = state
        .store
        .tasks()
        .iter()
        .map(|t| {
            let mut title_style = Style::default();
            if t.completed {
                title_style = title_style.fg(Color::DarkGray);
                if strikethrough {
                    title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
                }
            }

            let due_span = match t.format_due_long() {
                Some(d) => Span::styled(format!("  {}", d), Style::default().fg(Color::Blue)),
                None => Span::styled("  No due date", Style::default().fg(Color::DarkGray)),
            };

            let mut lines = vec![Line::from(vec![
                Span::raw(t.checkbox_symbol()),
                Span::raw(" "),
                Span::styled(t.title.clone(), title_style),
                due_span,
            ])];

            if show_descriptions && !t.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", t.description),
                    Style::default().fg(Color::Gray),
                )));
            }

            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Color::Blue),
    );
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_details(f: &mut Frame, state: &AppState, area: Rect) {
    let mut text = String::new();
    if let Some(idx) = state.list_state.selected()
        && let Some(task) = state.store.tasks().get(idx)
    {
        if !task.description.is_empty() {
            text.push_str(&task.description);
            text.push('\n');
        }
        match task.format_due_long() {
            Some(d) => text.push_str(&format!("Due: {}", d)),
            None => text.push_str("No due date"),
        }
    }
    if text.is_empty() {
        text = "No details.".to_string();
    }

    let details = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(details, area);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help_str = match state.mode {
        InputMode::Normal => "q:Quit a:Add e/Enter:Edit Spc:Done d:Del j/k:Move",
        InputMode::Creating | InputMode::Editing => "Tab:Next Field  Enter:Save  Esc:Cancel",
    };
    let help = Paragraph::new(help_str).alignment(Alignment::Right).block(
        Block::default()
            .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
            .title(" Actions "),
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    f.render_widget(status, chunks[0]);
    f.render_widget(help, chunks[1]);
}

/// The create form and the edit modal share the same three-field layout;
/// only the title differs.
fn draw_form_modal(f: &mut Frame, state: &AppState) {
    let title = match state.mode {
        InputMode::Creating => " New Task ",
        _ => " Edit Task ",
    };

    let area = form_modal_area(f.area());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);

    let fields = [
        (" Title ", &state.form.title, FormField::Title),
        (" Description ", &state.form.description, FormField::Description),
        (" Due Date (YYYY-MM-DD) ", &state.form.due_date, FormField::DueDate),
    ];

    for (i, (label, field, kind)) in fields.iter().enumerate() {
        let focused = state.form.focus == *kind;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(field.buffer.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(*label)
                .border_style(border_style),
        );
        f.render_widget(widget, rows[i]);

        if focused {
            let cursor_x = rows[i].x + 1 + field.cursor as u16;
            f.set_cursor_position((
                cursor_x.min(rows[i].x + rows[i].width.saturating_sub(2)),
                rows[i].y + 1,
            ));
        }
    }
}

/// Where the task form pops up. The event loop uses this to tell a click
/// on the form apart from a click on the backdrop.
pub fn form_modal_area(frame_area: Rect) -> Rect {
    centered_rect(60, 11, frame_area)
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let v_margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(v_margin),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
