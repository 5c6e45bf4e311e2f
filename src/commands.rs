use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use log::{info, warn};

use crate::calendar::{self, days_of_week, format_hour, format_short_date, hours_of_day};
use crate::error::{Error, Result};
use crate::models::{clean_item_fields, GoalId, RoleId, Task, TaskId, TaskUpdate};
use crate::store::Store;

/// What a drag carries from the task list to a calendar cell: the task id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload(pub TaskId);

impl DragPayload {
    pub fn for_task(task: &Task) -> DragPayload {
        DragPayload(task.id.clone())
    }

    pub fn task_id(&self) -> &str {
        &self.0
    }
}

/// A row of the week grid: the untimed "day" row or a specific hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Day,
    Hour(u8),
}

/// Adds a role after trimming its fields.
pub fn cmd_add_role(store: &mut Store, title: &str, description: &str) -> Result<RoleId> {
    let (title, description) = clean_item_fields(title, description)?;
    let id = store.add_role(&title, &description);
    info!("event=add_role status=ok role_id={} title={:?}", id, title);
    Ok(id)
}

pub fn cmd_add_goal(store: &mut Store, role_id: &str, title: &str, description: &str) -> Result<GoalId> {
    let (title, description) = clean_item_fields(title, description)?;
    match store.add_goal(role_id, &title, &description) {
        Some(id) => {
            info!("event=add_goal status=ok role_id={} goal_id={}", role_id, id);
            Ok(id)
        }
        None => {
            warn!("event=add_goal status=not_found role_id={}", role_id);
            Err(Error::RoleNotFound(role_id.to_string()))
        }
    }
}

pub fn cmd_add_task(store: &mut Store, goal_id: &str, title: &str, description: &str) -> Result<TaskId> {
    let (title, description) = clean_item_fields(title, description)?;
    match store.add_task(goal_id, &title, &description) {
        Some(id) => {
            info!("event=add_task status=ok goal_id={} task_id={}", goal_id, id);
            Ok(id)
        }
        None => {
            warn!("event=add_task status=not_found goal_id={}", goal_id);
            Err(Error::GoalNotFound(goal_id.to_string()))
        }
    }
}

/// Flips the completion flag of a task. Returns the new value.
pub fn cmd_toggle_task(store: &mut Store, task_id: &str) -> Result<bool> {
    let completed = !task_or_err(store, task_id)?.completed;
    if !store.update_task(task_id, TaskUpdate::completed(completed)) {
        warn!("event=toggle_task status=not_found task_id={}", task_id);
        return Err(Error::TaskNotFound(task_id.to_string()));
    }
    info!("event=toggle_task status=ok task_id={} completed={}", task_id, completed);
    Ok(completed)
}

pub fn cmd_delete_role(store: &mut Store, role_id: &str) -> Result<()> {
    if !store.delete_role(role_id) {
        warn!("event=delete_role status=not_found role_id={}", role_id);
        return Err(Error::RoleNotFound(role_id.to_string()));
    }
    info!("event=delete_role status=ok role_id={}", role_id);
    Ok(())
}

pub fn cmd_delete_goal(store: &mut Store, goal_id: &str) -> Result<()> {
    if !store.delete_goal(goal_id) {
        warn!("event=delete_goal status=not_found goal_id={}", goal_id);
        return Err(Error::GoalNotFound(goal_id.to_string()));
    }
    info!("event=delete_goal status=ok goal_id={}", goal_id);
    Ok(())
}

pub fn cmd_delete_task(store: &mut Store, task_id: &str) -> Result<()> {
    if !store.delete_task(task_id) {
        warn!("event=delete_task status=not_found task_id={}", task_id);
        return Err(Error::TaskNotFound(task_id.to_string()));
    }
    info!("event=delete_task status=ok task_id={}", task_id);
    Ok(())
}

/// Schedules a task from user text: an ISO date and an optional time like "7pm".
pub fn cmd_schedule(store: &mut Store, task_id: &str, date: &str, time: Option<&str>) -> Result<()> {
    let date = calendar::parse_date(date).ok_or_else(|| Error::InvalidDate(date.to_string()))?;
    let hour = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => Some(calendar::parse_time_string(t).ok_or_else(|| Error::InvalidTime(t.to_string()))?),
        None => None,
    };
    let scheduled = match hour {
        Some(h) => store.schedule_task_at(task_id, date, h),
        None => store.schedule_task(task_id, date),
    };
    if !scheduled {
        warn!("event=schedule_task status=not_found task_id={}", task_id);
        return Err(Error::TaskNotFound(task_id.to_string()));
    }
    info!("event=schedule_task status=ok task_id={} date={} hour={:?}", task_id, date, hour);
    Ok(())
}

/// Splits "YYYY-MM-DD [time]" into its parts and schedules the task.
///
/// The time is a single token such as "7pm"; anything after it is rejected.
pub fn cmd_schedule_input(store: &mut Store, task_id: &str, input: &str) -> Result<()> {
    let mut parts = input.split_whitespace();
    let date = parts.next().ok_or_else(|| Error::InvalidDate(input.to_string()))?;
    let rest: Vec<&str> = parts.collect();
    let time = match rest.as_slice() {
        [] => None,
        [t] => Some(*t),
        _ => return Err(Error::InvalidTime(rest.join(" "))),
    };
    cmd_schedule(store, task_id, date, time)
}

pub fn cmd_unschedule(store: &mut Store, task_id: &str) -> Result<()> {
    if !store.unschedule_task(task_id) {
        warn!("event=unschedule_task status=not_found task_id={}", task_id);
        return Err(Error::TaskNotFound(task_id.to_string()));
    }
    info!("event=unschedule_task status=ok task_id={}", task_id);
    Ok(())
}

/// Drop handler for a dragged task.
///
/// The payload is resolved through the store before anything changes, so a
/// stale payload (the task was deleted mid-drag) is reported instead of
/// silently ignored.
pub fn cmd_drop(store: &mut Store, payload: &DragPayload, date: NaiveDate, hour: Option<u8>) -> Result<()> {
    if let Some(h) = hour {
        if h > 23 {
            return Err(Error::InvalidTime(h.to_string()));
        }
    }
    let task_id = task_or_err(store, payload.task_id())?.id.clone();
    if !store.update_task(&task_id, TaskUpdate::schedule(date, hour)) {
        warn!("event=drop_task status=not_found task_id={}", task_id);
        return Err(Error::TaskNotFound(task_id));
    }
    info!("event=drop_task status=ok task_id={} date={} hour={:?}", task_id, date, hour);
    Ok(())
}

/// Tasks shown in one cell of the week grid.
///
/// The day row holds untimed tasks plus timed ones whose hour falls outside
/// the displayed range.
pub fn tasks_in_slot(store: &Store, date: NaiveDate, slot: Slot) -> Vec<&Task> {
    store
        .get_scheduled_tasks(date)
        .into_iter()
        .filter(|t| match (slot, t.scheduled_hour) {
            (Slot::Day, None) => true,
            (Slot::Day, Some(h)) => !(calendar::FIRST_HOUR..=calendar::LAST_HOUR).contains(&h),
            (Slot::Hour(s), Some(h)) => s == h,
            (Slot::Hour(_), None) => false,
        })
        .collect()
}

/// Short label for a task inside a grid cell.
pub fn task_label(task: &Task, slot: Slot) -> String {
    let mark = if task.completed { "[x] " } else { "" };
    match (slot, task.scheduled_hour) {
        (Slot::Day, Some(h)) => format!("{}{} {}", mark, format_hour(h), task.title),
        _ => format!("{}{}", mark, task.title),
    }
}

/// "Jun 1 7pm", "Jun 1", or an empty string for an unscheduled task.
pub fn schedule_label(task: &Task) -> String {
    match (task.scheduled_date, task.scheduled_hour) {
        (Some(d), Some(h)) => format!("{} {}", format_short_date(d), format_hour(h)),
        (Some(d), None) => format_short_date(d),
        _ => String::new(),
    }
}

/// Builds the hierarchy table: one row per task, with role and goal rows
/// for branches that have no children.
pub fn tree_table(store: &Store) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Role").add_attribute(Attribute::Bold),
            Cell::new("Goal").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Scheduled").add_attribute(Attribute::Bold),
        ]);

    for role in store.roles() {
        if role.goals.is_empty() {
            table.add_row(vec![Cell::new(&role.title), Cell::new("-"), Cell::new("-"), Cell::new(&role.id)]);
            continue;
        }
        for goal in &role.goals {
            if goal.tasks.is_empty() {
                table.add_row(vec![Cell::new(&role.title), Cell::new(&goal.title), Cell::new("-"), Cell::new(&goal.id)]);
                continue;
            }
            for t in &goal.tasks {
                let status = if t.completed { "Done" } else { "Pending" };
                let status_color = if t.completed { Color::Green } else { Color::Yellow };
                table.add_row(vec![
                    Cell::new(&role.title),
                    Cell::new(&goal.title),
                    Cell::new(&t.title),
                    Cell::new(&t.id),
                    Cell::new(status).fg(status_color),
                    Cell::new(schedule_label(t)),
                ]);
            }
        }
    }
    table
}

/// Prints the hierarchy as a table or as JSON.
pub fn cmd_tree(store: &Store, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.roles())?);
        return Ok(());
    }
    if store.is_empty() {
        println!("No roles yet.");
        return Ok(());
    }
    println!("{}", tree_table(store));
    Ok(())
}

/// Builds the week grid for the week containing `reference`.
pub fn week_table(store: &Store, reference: NaiveDate) -> Table {
    let days = days_of_week(reference);
    let mut header = vec![Cell::new("")];
    header.extend(days.iter().map(|d| {
        Cell::new(format!("{}\n{} {}", d.day_name, d.month, d.day_number)).add_attribute(Attribute::Bold)
    }));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    let mut slots = vec![(String::from("day"), Slot::Day)];
    slots.extend(hours_of_day().into_iter().map(|h| (h.label, Slot::Hour(h.hour))));

    for (label, slot) in slots {
        let mut row = vec![Cell::new(label).fg(Color::Cyan)];
        for day in &days {
            let names: Vec<String> = tasks_in_slot(store, day.date, slot)
                .into_iter()
                .map(|t| task_label(t, slot))
                .collect();
            row.push(Cell::new(names.join("\n")));
        }
        table.add_row(row);
    }
    table
}

pub fn cmd_week(store: &Store, reference: NaiveDate) {
    println!("{}", week_table(store, reference));
}

/// Prints the displayable hours of the grid.
pub fn cmd_hours() {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Hour", "Label"]);
    for h in hours_of_day() {
        table.add_row(vec![format!("{:02}:00", h.hour), h.label]);
    }
    println!("{table}");
}

fn task_or_err<'a>(store: &'a Store, task_id: &str) -> Result<&'a Task> {
    store.get_task_by_id(task_id).ok_or_else(|| {
        warn!("event=lookup_task status=not_found task_id={}", task_id);
        Error::TaskNotFound(task_id.to_string())
    })
}
