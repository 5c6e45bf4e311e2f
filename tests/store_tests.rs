use chrono::NaiveDate;
use roleplan::models::TaskUpdate;
use roleplan::Store;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Store with one role, one goal and one task; returns the ids too.
fn work_store() -> (Store, String, String, String) {
    let mut store = Store::new();
    let role = store.add_role("Work", "Professional responsibilities");
    let goal = store.add_goal(&role, "Q2", "Quarter goals").unwrap();
    let task = store.add_task(&goal, "Plan", "Write the plan").unwrap();
    (store, role, goal, task)
}

#[test]
fn test_schedule_scenario() {
    let (mut store, _role, _goal, task) = work_store();

    assert!(store.schedule_task(&task, date("2024-06-01")));

    let scheduled = store.get_scheduled_tasks(date("2024-06-01"));
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].id, task);
    assert_eq!(scheduled[0].scheduled_date, Some(date("2024-06-01")));
    assert!(store.get_scheduled_tasks(date("2024-06-02")).is_empty());
}

#[test]
fn test_add_links_children_to_parents() {
    let (store, role, goal, task) = work_store();

    let r = store.role(&role).unwrap();
    assert_eq!(r.goals.len(), 1);
    assert_eq!(r.goals[0].role_id, role);

    let t = store.get_task_by_id(&task).unwrap();
    assert_eq!(t.goal_id, goal);
    assert_eq!(t.title, "Plan");
    assert!(!t.completed);
    assert!(t.scheduled_date.is_none());
    assert!(t.scheduled_hour.is_none());
}

#[test]
fn test_ids_are_unique() {
    let mut store = Store::new();
    let a = store.add_role("A", "");
    let b = store.add_role("A", "");
    assert_ne!(a, b);
    let g1 = store.add_goal(&a, "G", "").unwrap();
    let g2 = store.add_goal(&a, "G", "").unwrap();
    assert_ne!(g1, g2);
}

#[test]
fn test_unknown_parents_are_noops() {
    let mut store = Store::new();
    assert!(store.add_goal("missing", "Goal", "").is_none());
    assert!(store.add_task("missing", "Task", "").is_none());
    assert!(store.is_empty());
    assert!(!store.update_task("missing", TaskUpdate::completed(true)));
    assert!(!store.delete_role("missing"));
    assert!(!store.delete_goal("missing"));
    assert!(!store.delete_task("missing"));
    assert!(!store.unschedule_task("missing"));
}

#[test]
fn test_update_task_merges_fields() {
    let (mut store, _role, _goal, task) = work_store();

    let update = TaskUpdate {
        title: Some("Plan v2".into()),
        completed: Some(true),
        ..TaskUpdate::default()
    };
    assert!(store.update_task(&task, update));

    let t = store.get_task_by_id(&task).unwrap();
    assert_eq!(t.title, "Plan v2");
    assert_eq!(t.description, "Write the plan");
    assert!(t.completed);
}

#[test]
fn test_unschedule_clears_date_and_hour() {
    let (mut store, _role, _goal, task) = work_store();
    store.schedule_task_at(&task, date("2024-06-03"), 9);
    assert_eq!(store.get_task_by_id(&task).unwrap().scheduled_hour, Some(9));

    assert!(store.unschedule_task(&task));

    let t = store.get_task_by_id(&task).unwrap();
    assert!(t.scheduled_date.is_none());
    assert!(t.scheduled_hour.is_none());
    assert!(store.get_scheduled_tasks(date("2024-06-03")).is_empty());
}

#[test]
fn test_hour_follows_date() {
    let (mut store, _role, _goal, task) = work_store();

    // No date yet: the hour is ignored.
    store.update_task(&task, TaskUpdate { scheduled_hour: Some(Some(10)), ..TaskUpdate::default() });
    assert!(store.get_task_by_id(&task).unwrap().scheduled_hour.is_none());

    store.schedule_task_at(&task, date("2024-06-04"), 10);
    // Clearing only the date drops the hour too.
    store.update_task(&task, TaskUpdate { scheduled_date: Some(None), ..TaskUpdate::default() });
    let t = store.get_task_by_id(&task).unwrap();
    assert!(t.scheduled_date.is_none());
    assert!(t.scheduled_hour.is_none());

    // A day-level schedule places the task without a time slot.
    store.schedule_task_at(&task, date("2024-06-04"), 10);
    store.schedule_task(&task, date("2024-06-05"));
    let t = store.get_task_by_id(&task).unwrap();
    assert_eq!(t.scheduled_date, Some(date("2024-06-05")));
    assert!(t.scheduled_hour.is_none());
}

#[test]
fn test_moving_date_drops_old_hour() {
    let (mut store, _role, _goal, task) = work_store();
    store.schedule_task_at(&task, date("2024-06-04"), 10);

    // Same date: the hour stays.
    store.update_task(&task, TaskUpdate { scheduled_date: Some(Some(date("2024-06-04"))), ..TaskUpdate::default() });
    assert_eq!(store.get_task_by_id(&task).unwrap().scheduled_hour, Some(10));

    store.update_task(&task, TaskUpdate { scheduled_date: Some(Some(date("2024-06-05"))), ..TaskUpdate::default() });
    let t = store.get_task_by_id(&task).unwrap();
    assert_eq!(t.scheduled_date, Some(date("2024-06-05")));
    assert!(t.scheduled_hour.is_none());

    // Date and hour together move as a pair.
    store.update_task(&task, TaskUpdate::schedule(date("2024-06-06"), Some(8)));
    let t = store.get_task_by_id(&task).unwrap();
    assert_eq!(t.scheduled_date, Some(date("2024-06-06")));
    assert_eq!(t.scheduled_hour, Some(8));
}

#[test]
fn test_schedule_rejects_invalid_hour() {
    let (mut store, _role, _goal, task) = work_store();
    assert!(!store.schedule_task_at(&task, date("2024-06-04"), 24));
    assert!(store.get_task_by_id(&task).unwrap().scheduled_date.is_none());
}

#[test]
fn test_delete_role_cascades() {
    let (mut store, role, _goal, task) = work_store();
    let other = store.add_role("Personal", "");
    let other_goal = store.add_goal(&other, "Learn", "").unwrap();
    let other_task = store.add_task(&other_goal, "Read", "").unwrap();
    store.schedule_task(&task, date("2024-06-01"));
    store.schedule_task(&other_task, date("2024-06-01"));

    assert!(store.delete_role(&role));

    assert!(store.get_task_by_id(&task).is_none());
    let scheduled = store.get_scheduled_tasks(date("2024-06-01"));
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].id, other_task);
}

#[test]
fn test_delete_goal_and_task() {
    let (mut store, role, goal, task) = work_store();
    let second = store.add_task(&goal, "Review", "").unwrap();

    assert!(store.delete_task(&task));
    assert!(store.get_task_by_id(&task).is_none());
    assert!(store.get_task_by_id(&second).is_some());

    assert!(store.delete_goal(&goal));
    assert!(store.get_task_by_id(&second).is_none());
    assert!(store.role(&role).unwrap().goals.is_empty());
}

#[test]
fn test_scheduled_tasks_in_encounter_order() {
    let mut store = Store::new();
    let r1 = store.add_role("R1", "");
    let r2 = store.add_role("R2", "");
    let g1 = store.add_goal(&r1, "G1", "").unwrap();
    let g2 = store.add_goal(&r2, "G2", "").unwrap();
    let t3 = store.add_task(&g2, "T3", "").unwrap();
    let t1 = store.add_task(&g1, "T1", "").unwrap();
    let t2 = store.add_task(&g1, "T2", "").unwrap();
    for t in [&t3, &t2, &t1] {
        store.schedule_task(t, date("2024-06-06"));
    }

    let ids: Vec<&str> = store
        .get_scheduled_tasks(date("2024-06-06"))
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec![t1.as_str(), t2.as_str(), t3.as_str()]);
}

#[test]
fn test_selection() {
    let (mut store, role, goal, _task) = work_store();

    assert!(store.select_role(Some(&role)));
    assert!(store.select_goal(Some(&goal)));
    assert_eq!(store.selected_goal(), Some(goal.as_str()));

    // Selecting a role clears the goal selection.
    assert!(store.select_role(Some(&role)));
    assert_eq!(store.selected_role(), Some(role.as_str()));
    assert!(store.selected_goal().is_none());

    // Unknown ids leave the selection alone.
    assert!(!store.select_role(Some("missing")));
    assert_eq!(store.selected_role(), Some(role.as_str()));
    assert!(!store.select_goal(Some("missing")));
    assert!(store.selected_goal().is_none());
}

#[test]
fn test_delete_clears_selection() {
    let (mut store, role, goal, _task) = work_store();

    store.select_role(Some(&role));
    store.select_goal(Some(&goal));
    store.delete_goal(&goal);
    assert!(store.selected_goal().is_none());
    assert_eq!(store.selected_role(), Some(role.as_str()));

    let goal = store.add_goal(&role, "Q3", "").unwrap();
    store.select_goal(Some(&goal));
    store.delete_role(&role);
    assert!(store.selected_role().is_none());
    assert!(store.selected_goal().is_none());
}

#[test]
fn test_seeded_store() {
    let store = Store::seeded();
    assert_eq!(store.roles().len(), 2);
    assert_eq!(store.roles()[0].title, "Work");
    assert_eq!(store.tasks().count(), 3);
    let t = store.get_task_by_id("1-1-2").unwrap();
    assert_eq!(t.title, "Schedule kick-off meeting");
    assert_eq!(t.goal_id, "1-1");
    assert_eq!(store.goal("2-1").unwrap().role_id, "2");
}
