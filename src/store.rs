//! In-memory state container for the role/goal/task hierarchy.
//!
//! Ownership is a plain tree: the store owns roles, roles own goals, goals
//! own tasks. Children only remember their parent's id. Operations on ids
//! that do not exist are no-ops and say so through their return value.

use chrono::NaiveDate;
use log::debug;

use crate::models::{Goal, GoalId, Role, RoleId, Task, TaskId, TaskUpdate};
use crate::seed::initial_roles;

#[derive(Debug, Clone, Default)]
pub struct Store {
    roles: Vec<Role>,
    selected_role: Option<RoleId>,
    selected_goal: Option<GoalId>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Store {
        Store::default()
    }

    /// Creates a store holding the initial dataset.
    pub fn seeded() -> Store {
        Store::with_roles(initial_roles())
    }

    pub fn with_roles(roles: Vec<Role>) -> Store {
        Store { roles, selected_role: None, selected_goal: None }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    pub fn goal(&self, goal_id: &str) -> Option<&Goal> {
        self.roles
            .iter()
            .flat_map(|r| r.goals.iter())
            .find(|g| g.id == goal_id)
    }

    /// Every task in encounter order (role, then goal, then task).
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.roles
            .iter()
            .flat_map(|r| r.goals.iter())
            .flat_map(|g| g.tasks.iter())
    }

    pub fn selected_role(&self) -> Option<&str> {
        self.selected_role.as_deref()
    }

    pub fn selected_goal(&self) -> Option<&str> {
        self.selected_goal.as_deref()
    }

    /// Appends a new role with no goals and returns its id.
    pub fn add_role(&mut self, title: &str, description: &str) -> RoleId {
        let role = Role::new(title, description);
        let id = role.id.clone();
        self.roles.push(role);
        id
    }

    /// Appends a goal to the role `role_id`. Returns `None` if the role is unknown.
    pub fn add_goal(&mut self, role_id: &str, title: &str, description: &str) -> Option<GoalId> {
        let Some(role) = self.roles.iter_mut().find(|r| r.id == role_id) else {
            debug!("event=add_goal status=skipped reason=unknown_role role_id={}", role_id);
            return None;
        };
        let goal = Goal::new(role_id, title, description);
        let id = goal.id.clone();
        role.goals.push(goal);
        Some(id)
    }

    /// Appends an incomplete, unscheduled task to the goal `goal_id`.
    pub fn add_task(&mut self, goal_id: &str, title: &str, description: &str) -> Option<TaskId> {
        let Some(goal) = self.goal_mut(goal_id) else {
            debug!("event=add_task status=skipped reason=unknown_goal goal_id={}", goal_id);
            return None;
        };
        let task = Task::new(goal_id, title, description);
        let id = task.id.clone();
        goal.tasks.push(task);
        Some(id)
    }

    /// Merges `update` into the task `task_id`. Returns `false` if no such task exists.
    pub fn update_task(&mut self, task_id: &str, update: TaskUpdate) -> bool {
        match self.task_mut(task_id) {
            Some(task) => {
                task.apply(update);
                true
            }
            None => {
                debug!("event=update_task status=skipped reason=unknown_task task_id={}", task_id);
                false
            }
        }
    }

    /// Removes a role together with its goals and tasks.
    pub fn delete_role(&mut self, role_id: &str) -> bool {
        let Some(idx) = self.roles.iter().position(|r| r.id == role_id) else {
            return false;
        };
        let role = self.roles.remove(idx);
        if self.selected_role.as_deref() == Some(role_id) {
            self.selected_role = None;
            self.selected_goal = None;
        }
        if let Some(goal_id) = &self.selected_goal {
            if role.goals.iter().any(|g| &g.id == goal_id) {
                self.selected_goal = None;
            }
        }
        true
    }

    /// Removes a goal together with its tasks.
    pub fn delete_goal(&mut self, goal_id: &str) -> bool {
        let mut removed = false;
        for role in self.roles.iter_mut() {
            let before = role.goals.len();
            role.goals.retain(|g| g.id != goal_id);
            removed |= role.goals.len() != before;
        }
        if removed && self.selected_goal.as_deref() == Some(goal_id) {
            self.selected_goal = None;
        }
        removed
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let mut removed = false;
        for goal in self.roles.iter_mut().flat_map(|r| r.goals.iter_mut()) {
            let before = goal.tasks.len();
            goal.tasks.retain(|t| t.id != task_id);
            removed |= goal.tasks.len() != before;
        }
        removed
    }

    /// Places the task on `date` without a time slot.
    pub fn schedule_task(&mut self, task_id: &str, date: NaiveDate) -> bool {
        self.update_task(task_id, TaskUpdate::schedule(date, None))
    }

    /// Places the task on `date` at `hour`. Hours past 23 are rejected.
    pub fn schedule_task_at(&mut self, task_id: &str, date: NaiveDate, hour: u8) -> bool {
        if hour > 23 {
            debug!("event=schedule_task status=skipped reason=invalid_hour hour={}", hour);
            return false;
        }
        self.update_task(task_id, TaskUpdate::schedule(date, Some(hour)))
    }

    /// Clears both the date and the hour of the task.
    pub fn unschedule_task(&mut self, task_id: &str) -> bool {
        self.update_task(task_id, TaskUpdate::unschedule())
    }

    pub fn get_task_by_id(&self, task_id: &str) -> Option<&Task> {
        self.tasks().find(|t| t.id == task_id)
    }

    /// All tasks scheduled on `date`, in encounter order.
    pub fn get_scheduled_tasks(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks()
            .filter(|t| t.scheduled_date == Some(date))
            .collect()
    }

    /// Selects a role (or clears the selection). Always clears the goal selection.
    pub fn select_role(&mut self, role_id: Option<&str>) -> bool {
        if let Some(id) = role_id {
            if self.role(id).is_none() {
                return false;
            }
        }
        self.selected_role = role_id.map(str::to_string);
        self.selected_goal = None;
        true
    }

    pub fn select_goal(&mut self, goal_id: Option<&str>) -> bool {
        if let Some(id) = goal_id {
            if self.goal(id).is_none() {
                return false;
            }
        }
        self.selected_goal = goal_id.map(str::to_string);
        true
    }

    fn goal_mut(&mut self, goal_id: &str) -> Option<&mut Goal> {
        self.roles
            .iter_mut()
            .flat_map(|r| r.goals.iter_mut())
            .find(|g| g.id == goal_id)
    }

    fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.roles
            .iter_mut()
            .flat_map(|r| r.goals.iter_mut())
            .flat_map(|g| g.tasks.iter_mut())
            .find(|t| t.id == task_id)
    }
}
