use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::store::TaskStore;
use crate::types::{ClassSession, Priority, Task, User, Weekday};

/// Contents of a JSON seed file. Missing sections fall back to the built-in data.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    pub tasks: Option<Vec<Task>>,
    pub classes: Option<Vec<ClassSession>>,
    pub user: Option<User>,
}

/// Build the session store, from a seed file when one is given
pub fn build_store(seed_path: Option<&Path>, now: NaiveDateTime) -> Result<TaskStore> {
    let seed = match seed_path {
        Some(path) => load_seed(path)?,
        None => Seed::default(),
    };

    let tasks = seed.tasks.unwrap_or_else(|| sample_tasks(now));
    let classes = seed.classes.unwrap_or_else(sample_classes);
    let user = seed.user.unwrap_or_else(current_user);

    check_unique_ids(&tasks)?;
    check_timestamps(&tasks)?;

    info!(
        tasks = tasks.len(),
        classes = classes.len(),
        "Store ready"
    );
    Ok(TaskStore::new(tasks, classes, user))
}

/// Load a seed file from disk
pub fn load_seed(path: &Path) -> Result<Seed> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let seed: Seed = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    debug!(
        path = %path.display(),
        tasks = seed.tasks.as_ref().map(Vec::len),
        classes = seed.classes.as_ref().map(Vec::len),
        "Loaded seed file"
    );
    Ok(seed)
}

fn check_unique_ids(tasks: &[Task]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            anyhow::bail!("Duplicate task id in seed data: {}", task.id);
        }
    }
    Ok(())
}

fn check_timestamps(tasks: &[Task]) -> Result<()> {
    if let Some(task) = tasks.iter().find(|t| t.updated_at < t.created_at) {
        anyhow::bail!(
            "Task {} in seed data was updated before it was created ({} < {})",
            task.id,
            task.updated_at,
            task.created_at
        );
    }
    Ok(())
}

pub fn current_user() -> User {
    User {
        id: "user-1".to_string(),
        name: "John Doe".to_string(),
        email: "john.doe@university.edu".to_string(),
        avatar: None,
    }
}

/// Sample tasks with deadlines around `now`
pub fn sample_tasks(now: NaiveDateTime) -> Vec<Task> {
    let make = |title: &str, description: &str, days: i64, priority: Priority, completed: bool| {
        let mut task = Task::new(title, description, now + Duration::days(days), priority, now);
        task.completed = completed;
        task
    };

    vec![
        make(
            "Math Assignment",
            "Complete exercises 1-10 from Chapter 5",
            2,
            Priority::High,
            false,
        ),
        make(
            "Physics Lab Report",
            "Write up results from the pendulum experiment",
            1,
            Priority::Urgent,
            false,
        ),
        make(
            "English Essay",
            "1500 words on Shakespeare's use of irony",
            5,
            Priority::Medium,
            false,
        ),
        make(
            "Computer Science Project",
            "Implement a binary search tree in Java",
            0,
            Priority::High,
            true,
        ),
        make(
            "History Presentation",
            "Prepare slides on the Industrial Revolution",
            -1,
            Priority::Medium,
            true,
        ),
    ]
}

/// The fixed weekly class schedule
pub fn sample_classes() -> Vec<ClassSession> {
    let rows: [(&str, &str, &str, (u32, u32), (u32, u32), Weekday, &str); 11] = [
        ("Mathematics", "Dr. Smith", "Room 101", (9, 0), (10, 30), Weekday::Monday, "blue"),
        ("Physics", "Prof. Johnson", "Lab 3", (11, 0), (13, 0), Weekday::Monday, "green"),
        ("Computer Science", "Dr. Williams", "Tech Hub", (14, 0), (16, 0), Weekday::Monday, "purple"),
        ("English Literature", "Prof. Davis", "Room 205", (9, 0), (11, 0), Weekday::Tuesday, "yellow"),
        ("Biology", "Dr. Miller", "Lab 2", (13, 0), (15, 0), Weekday::Tuesday, "red"),
        ("History", "Prof. Wilson", "Room 304", (9, 0), (11, 0), Weekday::Wednesday, "orange"),
        ("Chemistry", "Dr. Brown", "Lab 1", (13, 0), (15, 0), Weekday::Wednesday, "teal"),
        ("Statistics", "Prof. Taylor", "Room 102", (10, 0), (12, 0), Weekday::Thursday, "indigo"),
        ("Psychology", "Dr. Anderson", "Room 201", (14, 0), (16, 0), Weekday::Thursday, "pink"),
        ("Economics", "Prof. Thomas", "Room 305", (9, 0), (11, 0), Weekday::Friday, "cyan"),
        ("Art History", "Dr. Martin", "Art Studio", (13, 0), (15, 0), Weekday::Friday, "emerald"),
    ];

    rows.iter()
        .enumerate()
        .filter_map(|(i, (title, instructor, location, start, end, day, color))| {
            Some(ClassSession {
                id: format!("class-{}", i + 1),
                title: title.to_string(),
                instructor: instructor.to_string(),
                location: location.to_string(),
                start_time: NaiveTime::from_hms_opt(start.0, start.1, 0)?,
                end_time: NaiveTime::from_hms_opt(end.0, end.1, 0)?,
                day: *day,
                color: Some(color.to_string()),
            })
        })
        .collect()
}
