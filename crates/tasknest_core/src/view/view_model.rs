//! Task view-model: intent handling and notification surfacing.
//!
//! # Responsibility
//! - Hold the raw task set as last delivered by the sync channel.
//! - Translate user intents (add/toggle/edit/delete) into channel calls.
//! - Convert every outcome into an Info/Error notification; never panic
//!   the view, never swallow a failure silently.
//!
//! # Invariants
//! - Local validation failures never reach the channel.
//! - A failed delivery keeps the previously delivered list visible.
//! - The edit draft is exclusively owned by this view-model.

use crate::model::task::{Task, TaskId, TaskPatch};
use crate::sync::channel::{ChannelResult, TaskChannel};
use crate::view::projection::{project_visible, TaskFilter, TaskSort};

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// One user-visible outcome message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// In-progress edit of one task's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub task_id: TaskId,
    pub draft_title: String,
}

/// Presentation state over one sync channel.
pub struct TaskViewModel<C: TaskChannel> {
    channel: C,
    tasks: Vec<Task>,
    filter: TaskFilter,
    sort: TaskSort,
    editing: Option<EditDraft>,
    notification: Option<Notification>,
}

impl<C: TaskChannel> TaskViewModel<C> {
    /// Creates a view-model over an injected channel; the task set starts
    /// empty until `refresh` or a snapshot delivery fills it.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            sort: TaskSort::default(),
            editing: None,
            notification: None,
        }
    }

    /// Raw task set as last delivered.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn sort(&self) -> TaskSort {
        self.sort
    }

    pub fn set_sort(&mut self, sort: TaskSort) {
        self.sort = sort;
    }

    /// Current edit draft, if any.
    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    /// Last notification without consuming it.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Takes the pending notification for display (modal-close analog).
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// Derived presentation list; pure, never mutates the raw set.
    pub fn visible_tasks(&self) -> Vec<Task> {
        project_visible(&self.tasks, self.filter, self.sort)
    }

    /// Re-issues `list` over the channel (pull-mode observation path).
    ///
    /// On failure the previously delivered list stays visible.
    pub fn refresh(&mut self) {
        match self.channel.list_tasks() {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => self.notify_error(format!("Failed to load tasks: {err}")),
        }
    }

    /// Ingests one push-mode delivery; each snapshot fully supersedes the
    /// previous list, and an error delivery keeps the last good list.
    pub fn apply_snapshot(&mut self, delivery: ChannelResult<Vec<Task>>) {
        match delivery {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => self.notify_error(format!("Failed to load tasks: {err}")),
        }
    }

    /// Adds a task; empty/whitespace titles are rejected locally before
    /// the channel is called.
    pub fn add_task(&mut self, title: &str) {
        if title.trim().is_empty() {
            self.notify_info("Task title cannot be empty.");
            return;
        }

        match self.channel.create_task(title) {
            Ok(task) => {
                // Newest-first store order puts a fresh create at the top.
                self.tasks.insert(0, task);
                self.notify_info("Task added successfully!");
            }
            Err(err) => self.notify_error(format!("Failed to add task: {err}")),
        }
    }

    /// Flips the completion flag of one task.
    pub fn toggle_completed(&mut self, task_id: TaskId) {
        let current = match self.tasks.iter().find(|task| task.id == task_id) {
            Some(task) => task.completed,
            None => {
                self.notify_error(format!("Failed to update task status: task not found: {task_id}"));
                return;
            }
        };

        match self.channel.update_task(task_id, &TaskPatch::completed(!current)) {
            Ok(updated) => self.replace_task(updated),
            Err(err) => self.notify_error(format!("Failed to update task status: {err}")),
        }
    }

    /// Starts editing one task; the draft starts from the stored title.
    pub fn begin_edit(&mut self, task_id: TaskId) {
        match self.tasks.iter().find(|task| task.id == task_id) {
            Some(task) => {
                self.editing = Some(EditDraft {
                    task_id,
                    draft_title: task.title.clone(),
                });
            }
            None => self.notify_error(format!("Failed to edit task: task not found: {task_id}")),
        }
    }

    /// Replaces the draft title while editing.
    pub fn set_draft_title(&mut self, value: impl Into<String>) {
        if let Some(draft) = &mut self.editing {
            draft.draft_title = value.into();
        }
    }

    /// Saves the draft; empty drafts are rejected locally and keep the
    /// edit open, channel failures keep it open too.
    pub fn save_edit(&mut self) {
        let (task_id, draft_title) = match &self.editing {
            Some(draft) => (draft.task_id, draft.draft_title.clone()),
            None => return,
        };

        if draft_title.trim().is_empty() {
            self.notify_info("Task title cannot be empty.");
            return;
        }

        match self.channel.update_task(task_id, &TaskPatch::title(draft_title)) {
            Ok(updated) => {
                self.replace_task(updated);
                self.editing = None;
                self.notify_info("Task updated successfully!");
            }
            Err(err) => self.notify_error(format!("Failed to update task: {err}")),
        }
    }

    /// Discards the draft without touching the store.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Permanently deletes one task.
    pub fn delete_task(&mut self, task_id: TaskId) {
        match self.channel.delete_task(task_id) {
            Ok(()) => {
                self.tasks.retain(|task| task.id != task_id);
                if self
                    .editing
                    .as_ref()
                    .is_some_and(|draft| draft.task_id == task_id)
                {
                    self.editing = None;
                }
                self.notify_info("Task deleted successfully!");
            }
            Err(err) => self.notify_error(format!("Failed to delete task: {err}")),
        }
    }

    fn replace_task(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
    }

    fn notify_info(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message));
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }
}
