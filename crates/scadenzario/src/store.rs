//! The task store: the one owned copy of the session's tasks, classes and user.
//!
//! Every page reads from and writes to the same store, so a task added on the
//! dashboard shows up on the calendar and in the export.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

use crate::types::{ClassSession, NewTask, Task, TaskUpdate, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    classes: Vec<ClassSession>,
    user: User,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>, classes: Vec<ClassSession>, user: User) -> Self {
        Self {
            tasks,
            classes,
            user,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn classes(&self) -> &[ClassSession] {
        &self.classes
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> StoreResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Create a task; new tasks go to the front of the list
    pub fn add(&mut self, new: NewTask, now: NaiveDateTime) -> StoreResult<&Task> {
        let title = validate_title(&new.title)?;
        let task = Task::new(title, new.description, new.deadline, new.priority, now);
        debug!(id = %task.id, title = %task.title, "Task created");
        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Apply a partial edit and refresh `updated_at`
    pub fn update(&mut self, id: &str, update: TaskUpdate, now: NaiveDateTime) -> StoreResult<&Task> {
        let title = update.title.as_deref().map(validate_title).transpose()?;
        let task = self.get_mut(id)?;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(deadline) = update.deadline {
            task.deadline = deadline;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(completed) = update.completed {
            task.completed = completed;
        }
        touch(task, now);

        debug!(id = %task.id, "Task updated");
        Ok(&*task)
    }

    /// Flip completion. `updated_at` is left alone.
    pub fn toggle_complete(&mut self, id: &str) -> StoreResult<&Task> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        debug!(id = %task.id, completed = task.completed, "Task toggled");
        Ok(&*task)
    }

    /// Move a task to a new deadline
    pub fn reschedule(&mut self, id: &str, deadline: NaiveDateTime, now: NaiveDateTime) -> StoreResult<&Task> {
        let task = self.get_mut(id)?;
        task.deadline = deadline;
        touch(task, now);
        debug!(id = %task.id, deadline = %task.deadline, "Task rescheduled");
        Ok(&*task)
    }

    /// Move a task to another day, keeping its time of day
    pub fn move_to_day(&mut self, id: &str, day: NaiveDate, now: NaiveDateTime) -> StoreResult<&Task> {
        let time = self.get(id)?.deadline.time();
        self.reschedule(id, day.and_time(time), now)
    }

    pub fn delete(&mut self, id: &str) -> StoreResult<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let task = self.tasks.remove(pos);
        debug!(id = %task.id, "Task deleted");
        Ok(task)
    }

    pub fn update_profile(&mut self, name: &str, email: &str) -> StoreResult<&User> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(StoreError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        self.user.name = name.to_string();
        self.user.email = email.to_string();
        Ok(&self.user)
    }
}

fn validate_title(title: &str) -> StoreResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::Validation("title is required".to_string()));
    }
    Ok(title.to_string())
}

/// updated_at never goes below created_at
fn touch(task: &mut Task, now: NaiveDateTime) {
    task.updated_at = now.max(task.created_at);
}
