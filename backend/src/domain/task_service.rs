//! Per-day to-do lists.
//!
//! Tasks are stored under `tasks_<userId>` as a map from date key to the
//! tasks of that day. When a calendar sync client initializes, every change
//! is mirrored to it as well.

use chrono::{NaiveDate, Utc};
use shared::{CalendarMonth, DaySummary, Task};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::calendar::CalendarService;
use crate::domain::calendar_sync::CalendarSync;
use crate::domain::{new_id, validation};
use crate::error::{AppError, AppResult};
use crate::storage::{JsonStore, StorageKey};

type TaskMap = BTreeMap<String, Vec<Task>>;

#[derive(Clone)]
pub struct TaskService {
    store: JsonStore,
    calendar_service: CalendarService,
    calendar_sync: Arc<dyn CalendarSync>,
}

impl TaskService {
    pub fn new(
        store: JsonStore,
        calendar_service: CalendarService,
        calendar_sync: Arc<dyn CalendarSync>,
    ) -> Self {
        Self {
            store,
            calendar_service,
            calendar_sync,
        }
    }

    fn load(&self, user_id: u64) -> AppResult<TaskMap> {
        Ok(self.store.load(&StorageKey::tasks(user_id))?)
    }

    fn save(&self, user_id: u64, mut tasks: TaskMap) -> AppResult<()> {
        // Days emptied by deletes are dropped so they stop showing a dot
        tasks.retain(|_, day_tasks| !day_tasks.is_empty());
        Ok(self.store.save(&StorageKey::tasks(user_id), &tasks)?)
    }

    pub fn tasks_for_date(&self, user_id: u64, date: NaiveDate) -> AppResult<Vec<Task>> {
        let key = CalendarService::format_date_key(date);
        Ok(self.load(user_id)?.remove(&key).unwrap_or_default())
    }

    pub async fn add_task(&self, user_id: u64, date: NaiveDate, text: &str) -> AppResult<Task> {
        let text = validation::required(text, "Task text is required")?;

        let mut task = Task {
            id: new_id("task"),
            text,
            completed: false,
            created_at: Utc::now(),
            calendar_event_id: None,
        };

        if self.calendar_sync.initialize().await {
            match self.calendar_sync.create_event(&task).await {
                Ok(event) => task.calendar_event_id = Some(event.id),
                Err(e) => warn!("Failed to create calendar event for task {}: {}", task.id, e),
            }
        }

        let key = CalendarService::format_date_key(date);
        let mut tasks = self.load(user_id)?;
        tasks.entry(key.clone()).or_default().push(task.clone());
        self.save(user_id, tasks)?;

        info!("Added task {} on {} for user {}", task.id, key, user_id);
        Ok(task)
    }

    pub async fn toggle_task(&self, user_id: u64, date: NaiveDate, task_id: &str) -> AppResult<Task> {
        let key = CalendarService::format_date_key(date);
        let mut tasks = self.load(user_id)?;

        let task = tasks
            .get_mut(&key)
            .and_then(|day| day.iter_mut().find(|t| t.id == task_id))
            .ok_or_else(|| AppError::not_found(format!("Task {} not found on {}", task_id, key)))?;
        task.completed = !task.completed;
        let updated = task.clone();

        self.save(user_id, tasks)?;

        if let Some(event_id) = &updated.calendar_event_id {
            if self.calendar_sync.initialize().await {
                if let Err(e) = self.calendar_sync.update_event(event_id, &updated).await {
                    warn!("Failed to update calendar event {}: {}", event_id, e);
                }
            }
        }

        Ok(updated)
    }

    pub async fn delete_task(&self, user_id: u64, date: NaiveDate, task_id: &str) -> AppResult<()> {
        let key = CalendarService::format_date_key(date);
        let mut tasks = self.load(user_id)?;

        let removed = tasks
            .get_mut(&key)
            .and_then(|day| {
                let position = day.iter().position(|t| t.id == task_id)?;
                Some(day.remove(position))
            })
            .ok_or_else(|| AppError::not_found(format!("Task {} not found on {}", task_id, key)))?;

        self.save(user_id, tasks)?;

        if let Some(event_id) = &removed.calendar_event_id {
            if self.calendar_sync.initialize().await {
                if let Err(e) = self.calendar_sync.delete_event(event_id).await {
                    warn!("Failed to delete calendar event {}: {}", event_id, e);
                }
            }
        }

        info!("Deleted task {} on {} for user {}", task_id, key, user_id);
        Ok(())
    }

    /// Month grid where each day's `item_count` is its number of tasks
    pub fn calendar(
        &self,
        user_id: u64,
        month: u32,
        year: i32,
        selected: NaiveDate,
    ) -> AppResult<CalendarMonth> {
        let tasks = self.load(user_id)?;
        let today = self.calendar_service.today();

        self.calendar_service
            .generate_calendar_month(month, year, today, selected, |date| DaySummary {
                item_count: tasks
                    .get(&CalendarService::format_date_key(date))
                    .map(Vec::len)
                    .unwrap_or(0),
                ..DaySummary::default()
            })
    }
}
