use crate::models::{Goal, Role, Task};

/// The dataset every session starts from.
pub fn initial_roles() -> Vec<Role> {
    vec![
        Role {
            id: "1".into(),
            title: "Work".into(),
            description: "Professional responsibilities".into(),
            goals: vec![Goal {
                id: "1-1".into(),
                title: "Complete Q2 Project".into(),
                description: "Finish all deliverables for Q2 project".into(),
                role_id: "1".into(),
                tasks: vec![
                    seed_task("1-1-1", "1-1", "Create project plan", "Outline project timeline and resources"),
                    seed_task("1-1-2", "1-1", "Schedule kick-off meeting", "Set up initial meeting with stakeholders"),
                ],
            }],
        },
        Role {
            id: "2".into(),
            title: "Personal".into(),
            description: "Personal development and life goals".into(),
            goals: vec![Goal {
                id: "2-1".into(),
                title: "Learn new skill".into(),
                description: "Develop a new skill to enhance personal growth".into(),
                role_id: "2".into(),
                tasks: vec![seed_task("2-1-1", "2-1", "Research courses", "Find relevant courses or resources")],
            }],
        },
    ]
}

fn seed_task(id: &str, goal_id: &str, title: &str, description: &str) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        completed: false,
        goal_id: goal_id.into(),
        scheduled_date: None,
        scheduled_hour: None,
    }
}
