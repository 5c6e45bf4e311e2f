use std::collections::HashSet;

use chrono::NaiveDate;
use ratatui::widgets::TableState;

use crate::calendar::{self, WeekCursor, WEEK_LEN};
use crate::commands::{
    cmd_add_goal, cmd_add_role, cmd_add_task, cmd_delete_goal, cmd_delete_role, cmd_delete_task,
    cmd_drop, cmd_schedule_input, cmd_toggle_task, cmd_unschedule, tasks_in_slot,
    DragPayload, Slot,
};
use crate::error::Result;
use crate::models::{GoalId, RoleId, Task, TaskId};
use crate::store::Store;

/// Number of grid rows: the day row plus one per displayable hour.
pub const GRID_ROWS: usize = 1 + (calendar::LAST_HOUR - calendar::FIRST_HOUR + 1) as usize;

#[derive(PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Focus {
    Sidebar,
    Calendar,
}

#[derive(PartialEq, Debug)]
pub enum InputField {
    None,
    Schedule,
}

/// What the add wizard is creating.
#[derive(PartialEq, Debug, Clone)]
pub enum AddKind {
    Role,
    Goal(RoleId),
    Task(GoalId),
}

/// One line of the sidebar tree.
#[derive(Debug, Clone)]
pub enum DisplayItem {
    Role { id: RoleId, title: String, goals: usize, expanded: bool },
    Goal { id: GoalId, role_id: RoleId, title: String, tasks: usize, expanded: bool },
    Task(Task),
}

/// State for the two-step "add" wizard (title, then description).
#[derive(Default)]
pub struct AddState {
    pub kind: Option<AddKind>,
    pub title: String,
    pub step: usize, // 0: Title, 1: Description
}

pub struct App {
    pub store: Store,
    pub display_items: Vec<DisplayItem>,
    pub state: TableState,
    pub focus: Focus,
    pub week: WeekCursor,
    pub cursor_day: usize,
    pub cursor_row: usize,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<TaskId>,
    pub add_state: AddState,
    pub expanded_roles: HashSet<RoleId>,
    pub expanded_goals: HashSet<GoalId>,
    pub dragging: Option<DragPayload>,
    pub status: Option<String>,
}

impl App {
    /// Creates an App over `store`, showing the current week.
    pub fn new(store: Store) -> App {
        App::with_week(store, WeekCursor::today())
    }

    pub fn with_week(store: Store, week: WeekCursor) -> App {
        let mut app = App {
            store,
            display_items: Vec::new(),
            state: TableState::default(),
            focus: Focus::Sidebar,
            week,
            cursor_day: 0,
            cursor_row: 0,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            add_state: AddState::default(),
            expanded_roles: HashSet::new(),
            expanded_goals: HashSet::new(),
            dragging: None,
            status: None,
        };
        app.reload();
        app
    }

    /// Rebuilds the sidebar rows from the store.
    pub fn reload(&mut self) {
        // Forget expansion of anything that no longer exists.
        let store = &self.store;
        self.expanded_roles.retain(|id| store.role(id).is_some());
        self.expanded_goals.retain(|id| store.goal(id).is_some());

        self.display_items.clear();
        for role in self.store.roles() {
            let role_open = self.expanded_roles.contains(&role.id);
            self.display_items.push(DisplayItem::Role {
                id: role.id.clone(),
                title: role.title.clone(),
                goals: role.goals.len(),
                expanded: role_open,
            });
            if !role_open {
                continue;
            }
            for goal in &role.goals {
                let goal_open = self.expanded_goals.contains(&goal.id);
                self.display_items.push(DisplayItem::Goal {
                    id: goal.id.clone(),
                    role_id: role.id.clone(),
                    title: goal.title.clone(),
                    tasks: goal.tasks.len(),
                    expanded: goal_open,
                });
                if goal_open {
                    for t in &goal.tasks {
                        self.display_items.push(DisplayItem::Task(t.clone()));
                    }
                }
            }
        }

        if self.display_items.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.display_items.len() {
                self.state.select(Some(self.display_items.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn selected_item(&self) -> Option<&DisplayItem> {
        self.state.selected().and_then(|i| self.display_items.get(i))
    }

    fn selected_task(&self) -> Option<&Task> {
        match self.selected_item() {
            Some(DisplayItem::Task(t)) => Some(t),
            _ => None,
        }
    }

    /// Selects the next sidebar row.
    pub fn next(&mut self) {
        if self.display_items.is_empty() { return; }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.display_items.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous sidebar row.
    pub fn previous(&mut self) {
        if self.display_items.is_empty() { return; }
        let i = match self.state.selected() {
            Some(0) | None => self.display_items.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Calendar,
            Focus::Calendar => Focus::Sidebar,
        };
    }

    /// Opens or closes the selected role or goal and moves the selection with it.
    pub fn toggle_expansion(&mut self) {
        let Some(item) = self.selected_item().cloned() else { return };
        match item {
            DisplayItem::Role { id, expanded, .. } => {
                if expanded {
                    self.expanded_roles.remove(&id);
                    self.store.select_role(None);
                } else {
                    self.expanded_roles.insert(id.clone());
                    self.store.select_role(Some(&id));
                }
            }
            DisplayItem::Goal { id, expanded, .. } => {
                if expanded {
                    self.expanded_goals.remove(&id);
                    self.store.select_goal(None);
                } else {
                    self.expanded_goals.insert(id.clone());
                    self.store.select_goal(Some(&id));
                }
            }
            DisplayItem::Task(_) => return,
        }
        self.reload();
    }

    /// Role the selected row belongs to, falling back to the store selection.
    pub fn current_role(&self) -> Option<RoleId> {
        match self.selected_item() {
            Some(DisplayItem::Role { id, .. }) => Some(id.clone()),
            Some(DisplayItem::Goal { role_id, .. }) => Some(role_id.clone()),
            Some(DisplayItem::Task(t)) => self.store.goal(&t.goal_id).map(|g| g.role_id.clone()),
            None => self.store.selected_role().map(str::to_string),
        }
    }

    /// Goal the selected row belongs to.
    ///
    /// On a role row (or with nothing selected) the store's selected goal is
    /// used only when it lives under that role.
    pub fn current_goal(&self) -> Option<GoalId> {
        match self.selected_item() {
            Some(DisplayItem::Goal { id, .. }) => Some(id.clone()),
            Some(DisplayItem::Task(t)) => Some(t.goal_id.clone()),
            Some(DisplayItem::Role { id, .. }) => self.selected_goal_under(id),
            None => self.store.selected_role().and_then(|r| self.selected_goal_under(r)),
        }
    }

    fn selected_goal_under(&self, role_id: &str) -> Option<GoalId> {
        self.store
            .selected_goal()
            .and_then(|g| self.store.goal(g))
            .filter(|g| g.role_id == role_id)
            .map(|g| g.id.clone())
    }

    /// Starts the add wizard for a role, a goal under the current role, or a
    /// task under the current goal.
    pub fn start_add(&mut self, kind: AddKind) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState { kind: Some(kind), ..AddState::default() };
        self.input_buffer.clear();
    }

    pub fn start_add_role(&mut self) {
        self.start_add(AddKind::Role);
    }

    pub fn start_add_goal(&mut self) {
        match self.current_role() {
            Some(role_id) => self.start_add(AddKind::Goal(role_id)),
            None => self.status = Some("Select a role first".into()),
        }
    }

    pub fn start_add_task(&mut self) {
        match self.current_goal() {
            Some(goal_id) => self.start_add(AddKind::Task(goal_id)),
            None => self.status = Some("Select a goal first".into()),
        }
    }

    /// Opens the schedule prompt for the selected task.
    pub fn start_schedule(&mut self) {
        if self.focus != Focus::Sidebar { return; }
        let Some(t) = self.selected_task() else { return };
        let id = t.id.clone();
        let prefill = match (t.scheduled_date, t.scheduled_hour) {
            (Some(d), Some(h)) => format!("{} {}", d, calendar::format_hour(h)),
            (Some(d), None) => d.to_string(),
            _ => String::new(),
        };
        self.target_id = Some(id);
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::Schedule;
        self.input_buffer = prefill;
    }

    /// Deletes the selected role, goal or task.
    pub fn delete_selected(&mut self) {
        let Some(item) = self.selected_item().cloned() else { return };
        let res = match &item {
            DisplayItem::Role { id, .. } => cmd_delete_role(&mut self.store, id),
            DisplayItem::Goal { id, .. } => cmd_delete_goal(&mut self.store, id),
            DisplayItem::Task(t) => cmd_delete_task(&mut self.store, &t.id),
        };
        if let DisplayItem::Task(t) = &item {
            if self.dragging.as_ref().is_some_and(|p| p.task_id() == t.id) {
                self.dragging = None;
            }
        }
        self.report(res);
        self.reload();
    }

    /// Toggles completion of the selected task.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else { return };
        let res = cmd_toggle_task(&mut self.store, &id).map(|_| ());
        self.report(res);
        self.reload();
    }

    pub fn unschedule_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else { return };
        let res = cmd_unschedule(&mut self.store, &id);
        self.report(res);
        self.reload();
    }

    /// Picks up the selected task and moves focus to the calendar.
    pub fn start_drag(&mut self) {
        let Some(t) = self.selected_task().cloned() else { return };
        let payload = DragPayload::for_task(&t);
        self.status = Some(format!("Moving '{}': Enter to drop, Esc to cancel", t.title));
        if let Some(d) = t.scheduled_date.filter(|d| self.week.contains(*d)) {
            self.cursor_day = self.day_index(d);
            self.cursor_row = t
                .scheduled_hour
                .filter(|h| (calendar::FIRST_HOUR..=calendar::LAST_HOUR).contains(h))
                .map(|h| (h - calendar::FIRST_HOUR) as usize + 1)
                .unwrap_or(0);
        }
        self.dragging = Some(payload);
        self.focus = Focus::Calendar;
    }

    /// Drops the carried task on the cell under the cursor.
    pub fn drop_at_cursor(&mut self) {
        let Some(payload) = self.dragging.take() else { return };
        let date = self.cursor_date();
        let hour = match self.cursor_slot() {
            Slot::Day => None,
            Slot::Hour(h) => Some(h),
        };
        let res = cmd_drop(&mut self.store, &payload, date, hour);
        if res.is_ok() {
            self.status = None;
        }
        self.report(res);
        self.reload();
    }

    /// Unschedules the first task in the cell under the cursor.
    pub fn unschedule_at_cursor(&mut self) {
        let date = self.cursor_date();
        let Some(id) = tasks_in_slot(&self.store, date, self.cursor_slot())
            .first()
            .map(|t| t.id.clone())
        else {
            return;
        };
        let res = cmd_unschedule(&mut self.store, &id);
        self.report(res);
        self.reload();
    }

    /// Moves the calendar cursor, clamped to the grid.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        self.cursor_day = (self.cursor_day as i32 + dx).clamp(0, WEEK_LEN as i32 - 1) as usize;
        self.cursor_row = (self.cursor_row as i32 + dy).clamp(0, GRID_ROWS as i32 - 1) as usize;
    }

    pub fn previous_week(&mut self) {
        self.week.previous_week();
    }

    pub fn next_week(&mut self) {
        self.week.next_week();
    }

    pub fn go_to_today(&mut self) {
        self.week.go_to_today();
    }

    pub fn cursor_date(&self) -> NaiveDate {
        calendar::week_start(self.week.reference()) + chrono::Duration::days(self.cursor_day as i64)
    }

    pub fn cursor_slot(&self) -> Slot {
        row_slot(self.cursor_row)
    }

    /// Leaves a prompt, or drops the carried task without moving it.
    pub fn cancel(&mut self) {
        if self.input_mode != InputMode::Normal {
            self.input_mode = InputMode::Normal;
            self.input_field = InputField::None;
            self.input_buffer.clear();
            return;
        }
        if self.dragging.take().is_some() {
            self.status = None;
        }
    }

    /// Handles text input based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => { // Title
                if !self.input_buffer.trim().is_empty() {
                    self.add_state.title = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => { // Description
                let title = self.add_state.title.clone();
                let description = self.input_buffer.clone();
                let res = match self.add_state.kind.clone() {
                    Some(AddKind::Role) => cmd_add_role(&mut self.store, &title, &description).map(|_| ()),
                    Some(AddKind::Goal(role_id)) => {
                        let res = cmd_add_goal(&mut self.store, &role_id, &title, &description);
                        if res.is_ok() {
                            self.expanded_roles.insert(role_id);
                        }
                        res.map(|_| ())
                    }
                    Some(AddKind::Task(goal_id)) => {
                        let res = cmd_add_task(&mut self.store, &goal_id, &title, &description);
                        if res.is_ok() {
                            if let Some(role_id) = self.store.goal(&goal_id).map(|g| g.role_id.clone()) {
                                self.expanded_roles.insert(role_id);
                            }
                            self.expanded_goals.insert(goal_id);
                        }
                        res.map(|_| ())
                    }
                    None => Ok(()),
                };
                self.report(res);
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.add_state = AddState::default();
                self.reload();
            }
            _ => {}
        }
    }

    fn handle_editing_input(&mut self) {
        if let (Some(id), true) = (self.target_id.clone(), self.input_field == InputField::Schedule) {
            let res = if self.input_buffer.trim().is_empty() {
                cmd_unschedule(&mut self.store, &id)
            } else {
                cmd_schedule_input(&mut self.store, &id, &self.input_buffer)
            };
            self.report(res);
        }
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
        self.target_id = None;
        self.reload();
    }

    fn day_index(&self, date: NaiveDate) -> usize {
        let start = calendar::week_start(self.week.reference());
        ((date - start).num_days().clamp(0, WEEK_LEN as i64 - 1)) as usize
    }

    fn report(&mut self, res: Result<()>) {
        if let Err(e) = res {
            self.status = Some(e.to_string());
        }
    }
}

/// Maps a grid row to its slot: row 0 is the day row, then one row per hour.
pub fn row_slot(row: usize) -> Slot {
    if row == 0 {
        Slot::Day
    } else {
        Slot::Hour(calendar::FIRST_HOUR + (row - 1) as u8)
    }
}
