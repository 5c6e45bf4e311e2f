use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use chrono::Local;
use crate::calendar::{format_short_date, hours_of_day};
use crate::commands::{schedule_label, task_label, tasks_in_slot, Slot};
use super::app::{AddKind, App, DisplayItem, Focus, InputMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Panes
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(chunks[0]);

    render_sidebar(f, app, panes[0]);
    render_calendar(f, app, panes[1]);

    let help_text = match app.input_mode {
        InputMode::Normal => match app.focus {
            Focus::Sidebar => "q: Quit | Tab: Calendar | Enter: Open | a: Role | g: Goal | t: Task | Space: Done | s: Schedule | u: Unschedule | m: Move | d: Del | [ ]: Week | .: Today",
            Focus::Calendar => "q: Quit | Tab: Sidebar | Arrows: Cell | Enter: Drop | x: Unschedule | Esc: Cancel move | [ ]: Week | .: Today",
        },
        InputMode::Editing => "Enter: Save (empty clears) | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };
    let help = match &app.status {
        Some(msg) => Paragraph::new(format!("{msg} | {help_text}")).style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(help_text).style(Style::default().fg(Color::Gray)),
    };
    f.render_widget(help.block(Block::default().borders(Borders::ALL)), chunks[1]);

    // Render Input Box if needed
    if app.input_mode != InputMode::Normal {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.input_mode {
            InputMode::Adding => {
                let what = match app.add_state.kind {
                    Some(AddKind::Role) => "Role",
                    Some(AddKind::Goal(_)) => "Goal",
                    Some(AddKind::Task(_)) => "Task",
                    None => "Item",
                };
                match app.add_state.step {
                    0 => format!("New {what}: Enter Title"),
                    _ => format!("New {what}: Enter Description (Optional)"),
                }
            }
            _ => "Schedule: YYYY-MM-DD [time, e.g. 7pm]".to_string(),
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);
    }
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused { Style::default().fg(Color::Cyan) } else { Style::default() };
    Block::default().borders(Borders::ALL).border_style(style).title(title)
}

fn render_sidebar(f: &mut Frame, app: &mut App, area: Rect) {
    let block = pane_block("Roles & Goals".to_string(), app.focus == Focus::Sidebar);

    if app.display_items.is_empty() {
        let empty = Paragraph::new("No roles yet. Press 'a' to create your first role!")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let selected_role = app.store.selected_role().map(str::to_string);
    let selected_goal = app.store.selected_goal().map(str::to_string);
    let carried = app.dragging.as_ref().map(|p| p.task_id().to_string());

    let rows: Vec<Row> = app
        .display_items
        .iter()
        .map(|item| match item {
            DisplayItem::Role { id, title, goals, expanded } => {
                let arrow = if *expanded { "v" } else { ">" };
                let mut style = Style::default().add_modifier(Modifier::BOLD);
                if selected_role.as_deref() == Some(id.as_str()) {
                    style = style.fg(Color::Cyan);
                }
                Row::new(vec![
                    Cell::from(format!("{arrow} {title}")),
                    Cell::from(format!("{goals} goals")),
                ]).style(style)
            }
            DisplayItem::Goal { id, title, tasks, expanded, .. } => {
                let arrow = if *expanded { "v" } else { ">" };
                let style = if selected_goal.as_deref() == Some(id.as_str()) {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(format!("  {arrow} {title}")),
                    Cell::from(format!("{tasks} tasks")),
                ]).style(style)
            }
            DisplayItem::Task(t) => {
                let check = if t.completed { "[x]" } else { "[ ]" };
                let mut style = if t.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                if carried.as_deref() == Some(t.id.as_str()) {
                    style = style.fg(Color::Yellow);
                }
                Row::new(vec![
                    Cell::from(format!("    {check} {}", t.title)),
                    Cell::from(schedule_label(t)),
                ]).style(style)
            }
        })
        .collect();

    let widths = [Constraint::Min(20), Constraint::Length(12)];
    let table = Table::new(rows, widths)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_calendar(f: &mut Frame, app: &App, area: Rect) {
    let days = app.week.days();
    let today = Local::now().date_naive();
    let focused = app.focus == Focus::Calendar;

    let mut header = vec![Cell::from("")];
    header.extend(days.iter().map(|d| {
        let style = if d.date == today {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        Cell::from(format!("{} {} {}", &d.day_name[..3], d.day_number, d.month)).style(style)
    }));

    let mut slots = vec![("day".to_string(), Slot::Day)];
    slots.extend(hours_of_day().into_iter().map(|h| (h.label, Slot::Hour(h.hour))));

    let rows: Vec<Row> = slots
        .into_iter()
        .enumerate()
        .map(|(row_idx, (label, slot))| {
            let mut cells = vec![Cell::from(label).style(Style::default().fg(Color::Gray))];
            for (day_idx, day) in days.iter().enumerate() {
                let names: Vec<String> = tasks_in_slot(&app.store, day.date, slot)
                    .into_iter()
                    .map(|t| task_label(t, slot))
                    .collect();
                let text = match names.len() {
                    0 => String::new(),
                    1 => names[0].clone(),
                    n => format!("{} +{}", names[0], n - 1),
                };
                let mut style = Style::default();
                if focused && row_idx == app.cursor_row && day_idx == app.cursor_day {
                    style = style.bg(if app.dragging.is_some() { Color::Blue } else { Color::DarkGray });
                }
                cells.push(Cell::from(text).style(style));
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(5)];
    widths.extend(std::iter::repeat(Constraint::Fill(1)).take(days.len()));

    let title = match (days.first(), days.last()) {
        (Some(first), Some(last)) => format!(
            "Weekly Calendar: {} - {}",
            format_short_date(first.date),
            format_short_date(last.date)
        ),
        _ => "Weekly Calendar".to_string(),
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header).bottom_margin(1))
        .block(pane_block(title, focused));

    f.render_widget(table, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
