//! The active task collection and the operations that mutate it.
//!
//! Every mutating operation validates its input (including resolving due-date
//! tokens) before touching the collection, so a failed call leaves the list
//! exactly as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::date::{self, DateError};
use crate::models::{DateInputMode, Priority, Status, Task};

/// A specialized Result type for task collection operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors that can occur while modifying the task collection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// No task has the requested ID.
    #[error("Task with ID {id} not found.")]
    NotFound {
        /// The requested ID.
        id: u32,
    },

    /// A due-date token could not be resolved.
    #[error(transparent)]
    Date(#[from] DateError),

    /// The largest existing ID is `u32::MAX`, so no new ID can be assigned.
    #[error("No task ID available: the highest ID in use is {max}.")]
    IdExhausted {
        /// The highest ID in use.
        max: u32,
    },
}

/// Input for [`TaskList::add`].
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub name: String,
    /// Raw due-date token, resolved with the active [`DateInputMode`].
    pub due: String,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub priority: Option<Priority>,
}

/// Field changes for [`TaskList::update`]. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub name: Option<String>,
    /// Raw due-date token, resolved with the active [`DateInputMode`].
    pub due: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskUpdate {
    /// Returns true if the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.due.is_none()
            && self.description.is_none()
            && self.tag.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }
}

/// Ordered collection of active tasks.
///
/// Serializes as a bare JSON array of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already loaded tasks, keeping their order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// The tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consumes the list, returning its tasks.
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the list holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates over the tasks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// The ID the next added task will receive: one past the largest
    /// existing ID, or 1 for an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IdExhausted`] if the largest ID is `u32::MAX`.
    pub fn next_id(&self) -> TaskResult<u32> {
        match self.tasks.iter().map(|task| task.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(TaskError::IdExhausted { max }),
        }
    }

    /// Looks up a task by ID.
    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn position(&self, id: u32) -> TaskResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound { id })
    }

    /// Appends a new task after resolving its due date.
    ///
    /// # Errors
    ///
    /// - [`TaskError::Date`] if the due token cannot be resolved.
    /// - [`TaskError::IdExhausted`] if no new ID can be assigned.
    ///
    /// On error the list is left unchanged.
    pub fn add(
        &mut self,
        new: NewTask,
        mode: DateInputMode,
        today: NaiveDate,
    ) -> TaskResult<&Task> {
        let due_date = date::resolve(&new.due, mode, today)?;
        let id = self.next_id()?;

        let mut task = Task::new(id, new.name, due_date);
        task.description = new.description.unwrap_or_default();
        task.tag = new.tag.unwrap_or_default();
        task.priority = new.priority.unwrap_or_default();

        debug!(id = task.id, due = %task.due_date, "adding task");

        let index = self.tasks.len();
        self.tasks.push(task);
        Ok(&self.tasks[index])
    }

    /// Applies field changes to an existing task.
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] if no task has `id`.
    /// - [`TaskError::Date`] if a new due token cannot be resolved.
    ///
    /// On error the task is left unchanged.
    pub fn update(
        &mut self,
        id: u32,
        update: TaskUpdate,
        mode: DateInputMode,
        today: NaiveDate,
    ) -> TaskResult<&Task> {
        let index = self.position(id)?;
        let due_date = update
            .due
            .as_deref()
            .map(|token| date::resolve(token, mode, today))
            .transpose()?;

        let task = &mut self.tasks[index];
        if let Some(name) = update.name {
            task.name = name;
        }
        if let Some(due_date) = due_date {
            task.due_date = due_date;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(tag) = update.tag {
            task.tag = tag;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(status) = update.status {
            task.status = status;
        }

        debug!(id, "updated task");
        Ok(&self.tasks[index])
    }

    /// Sets the status of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no task has `id`.
    pub fn set_status(&mut self, id: u32, status: Status) -> TaskResult<&Task> {
        let index = self.position(id)?;
        self.tasks[index].status = status;
        debug!(id, %status, "updated task status");
        Ok(&self.tasks[index])
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no task has `id`.
    pub fn remove(&mut self, id: u32) -> TaskResult<Task> {
        let index = self.position(id)?;
        debug!(id, "removing task");
        Ok(self.tasks.remove(index))
    }

    /// Removes every completed task, returning them in their original order.
    pub fn drain_completed(&mut self) -> Vec<Task> {
        let (completed, active): (Vec<Task>, Vec<Task>) =
            std::mem::take(&mut self.tasks)
                .into_iter()
                .partition(Task::is_completed);
        self.tasks = active;
        completed
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
