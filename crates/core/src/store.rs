use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::filter::FilterCriteria;
use crate::model::{NewTask, RemoteTodo, StatusCounts, Task, TaskStatus};
use crate::notify::Notification;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("No task ids left to assign")]
    IdsExhausted,
}

/// Summary of a bulk load, for logging and the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub dropped: usize,
}

/// Owns the task collection and keeps the filtered view and counts in step
/// with it. Every mutation recomputes both from the full collection.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    criteria: FilterCriteria,
    visible: Vec<usize>,
    counts: StatusCounts,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
            counts: StatusCounts::default(),
        }
    }

    /// Replace the whole collection with items from the data source.
    pub fn load(&mut self, items: Vec<RemoteTodo>) -> LoadReport {
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(items.len());
        let mut dropped = 0usize;

        for item in items {
            let Some(id) = item.id else {
                warn!(title = ?item.title, "dropping remote todo without an id");
                dropped += 1;
                continue;
            };
            let title = match item.title.as_deref().map(str::trim) {
                Some(title) if !title.is_empty() => title.to_string(),
                _ => {
                    warn!(id, "dropping remote todo without a title");
                    dropped += 1;
                    continue;
                }
            };
            if id == u64::MAX {
                warn!(id, "dropping remote todo with an id too large to follow");
                dropped += 1;
                continue;
            }
            if !seen.insert(id) {
                warn!(id, "dropping remote todo with a duplicate id");
                dropped += 1;
                continue;
            }

            tasks.push(Task {
                id,
                title,
                description: normalize_description(item.description),
                status: TaskStatus::from_completed(item.completed),
            });
        }

        self.next_id = tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        self.tasks = tasks;
        self.recompute();

        LoadReport {
            loaded: self.tasks.len(),
            dropped,
        }
    }

    /// Prepend a new task. Ids come from a counter that never goes backwards,
    /// so deleting and creating cannot reuse an id.
    pub fn create(&mut self, input: NewTask) -> Result<(Task, Notification), StoreError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;

        let task = Task {
            id,
            title: title.to_string(),
            description: normalize_description(input.description),
            status: input.status,
        };
        self.tasks.insert(0, task.clone());
        self.recompute();
        debug!(id = task.id, status = task.status.as_str(), "created task");
        Ok((task, Notification::Created))
    }

    pub fn update_status(&mut self, id: u64, status: TaskStatus) -> Option<Notification> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.status = status;
        self.recompute();
        debug!(id, status = status.as_str(), "updated task status");
        Some(Notification::StatusEdited)
    }

    pub fn update_title(&mut self, id: u64, title: &str) -> Option<Notification> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.title = title.to_string();
        self.recompute();
        debug!(id, "updated task title");
        Some(Notification::TitleEdited)
    }

    pub fn delete(&mut self, id: u64) -> Option<Notification> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        self.tasks.remove(idx);
        self.recompute();
        debug!(id, "deleted task");
        Some(Notification::Deleted)
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.criteria.set_query(query);
        self.recompute();
    }

    pub fn set_status_filter(&mut self, status: Option<TaskStatus>) {
        self.criteria.set_status(status);
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.recompute();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filtered(&self) -> Vec<&Task> {
        self.visible.iter().map(|&idx| &self.tasks[idx]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn recompute(&mut self) {
        self.visible = self.criteria.select(&self.tasks);
        self.counts = StatusCounts::tally(&self.tasks);
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn remote(id: u64, title: &str, completed: bool) -> RemoteTodo {
        RemoteTodo {
            id: Some(id),
            title: Some(title.to_string()),
            description: None,
            completed,
        }
    }

    fn seeded() -> TaskStore {
        let mut store = TaskStore::new();
        store.load(vec![
            remote(1, "delectus aut autem", false),
            remote(2, "quis ut nam facilis", true),
            remote(3, "fugiat veniam minus", false),
        ]);
        store
    }

    fn ids(store: &TaskStore) -> Vec<u64> {
        store.filtered().iter().map(|t| t.id).collect()
    }

    #[test]
    fn load_maps_completed_flag_and_counts() {
        let store = seeded();
        assert_eq!(
            store.counts(),
            StatusCounts {
                to_do: 2,
                in_progress: 0,
                done: 1
            }
        );
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn load_drops_malformed_and_duplicate_items() {
        let mut store = TaskStore::new();
        let report = store.load(vec![
            remote(1, "kept", false),
            RemoteTodo {
                id: None,
                title: Some("no id".into()),
                ..RemoteTodo::default()
            },
            RemoteTodo {
                id: Some(2),
                title: Some("   ".into()),
                ..RemoteTodo::default()
            },
            remote(1, "duplicate", true),
        ]);

        assert_eq!(report, LoadReport { loaded: 1, dropped: 3 });
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].title, "kept");
    }

    #[test]
    fn load_replaces_previous_collection() {
        let mut store = seeded();
        store.load(vec![remote(9, "only", true)]);
        assert_eq!(ids(&store), vec![9]);
        assert_eq!(store.counts().done, 1);
        assert_eq!(store.counts().total(), 1);
    }

    #[test]
    fn create_prepends_with_fresh_id() {
        let mut store = seeded();
        let (task, notification) = store
            .create(NewTask::new("B").with_status(TaskStatus::InProgress))
            .unwrap();

        assert_eq!(notification, Notification::Created);
        assert_eq!(task.id, 4);
        assert_eq!(store.tasks()[0], task);
        assert_eq!(store.counts().in_progress, 1);
    }

    #[test]
    fn create_never_reuses_ids_after_delete() {
        let mut store = seeded();
        store.delete(3);
        let (first, _) = store.create(NewTask::new("one")).unwrap();
        store.delete(first.id);
        let (second, _) = store.create(NewTask::new("two")).unwrap();

        let all: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        let unique: HashSet<u64> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(first.id, 4);
        assert_eq!(second.id, 5);
    }

    #[test]
    fn create_rejects_blank_title() {
        let mut store = seeded();
        let err = store.create(NewTask::new("  ")).unwrap_err();
        assert_eq!(err, StoreError::EmptyTitle);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn load_drops_max_id_so_created_ids_stay_unique() {
        let mut store = TaskStore::new();
        let report = store.load(vec![
            remote(1, "first", false),
            remote(u64::MAX, "huge", false),
        ]);
        assert_eq!(report, LoadReport { loaded: 1, dropped: 1 });

        store.create(NewTask::new("a")).unwrap();
        store.create(NewTask::new("b")).unwrap();
        let mut all: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3]);
    }

    #[test]
    fn create_reports_exhausted_ids_instead_of_wrapping() {
        let mut store = TaskStore::new();
        store.load(vec![remote(u64::MAX - 1, "near the end", false)]);

        let err = store.create(NewTask::new("one too many")).unwrap_err();
        assert_eq!(err, StoreError::IdsExhausted);
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].id, u64::MAX - 1);
    }

    #[test]
    fn create_trims_and_drops_empty_description() {
        let mut store = TaskStore::new();
        let (task, _) = store
            .create(NewTask::new("  title ").with_description("   "))
            .unwrap();
        assert_eq!(task.title, "title");
        assert_eq!(task.description, None);
    }

    #[test]
    fn create_respects_active_filters() {
        let mut store = seeded();
        store.set_status_filter(Some(TaskStatus::Done));
        store.create(NewTask::new("fresh")).unwrap();
        assert_eq!(ids(&store), vec![2]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn update_status_recounts() {
        let mut store = seeded();
        assert_eq!(
            store.update_status(1, TaskStatus::Done),
            Some(Notification::StatusEdited)
        );
        assert_eq!(store.counts().done, 2);
        assert_eq!(store.counts().to_do, 1);
        assert_eq!(store.get(1).map(|t| t.status), Some(TaskStatus::Done));
    }

    #[test]
    fn update_status_for_missing_id_is_a_no_op() {
        let mut store = seeded();
        let before = store.clone();
        assert_eq!(store.update_status(42, TaskStatus::Done), None);
        assert_eq!(store.tasks(), before.tasks());
        assert_eq!(store.counts(), before.counts());
    }

    #[test]
    fn update_status_refreshes_filtered_view() {
        let mut store = seeded();
        store.set_status_filter(Some(TaskStatus::ToDo));
        assert_eq!(ids(&store), vec![1, 3]);
        store.update_status(1, TaskStatus::InProgress);
        assert_eq!(ids(&store), vec![3]);
    }

    #[test]
    fn update_title_ignores_blank_and_missing() {
        let mut store = seeded();
        assert_eq!(store.update_title(1, " "), None);
        assert_eq!(store.update_title(99, "x"), None);
        assert_eq!(
            store.update_title(1, "renamed"),
            Some(Notification::TitleEdited)
        );
        assert_eq!(store.get(1).map(|t| t.title.as_str()), Some("renamed"));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = seeded();
        assert_eq!(store.delete(1), Some(Notification::Deleted));
        let after_first = store.tasks().to_vec();
        assert_eq!(store.delete(1), None);
        assert_eq!(store.tasks(), after_first.as_slice());
        assert_eq!(store.counts().to_do, 1);
    }

    #[test]
    fn search_and_status_filters_recompute_from_full_collection() {
        let mut store = seeded();
        store.set_search_query("U");
        assert_eq!(ids(&store), vec![1, 2, 3]);
        store.set_search_query("veniam");
        assert_eq!(ids(&store), vec![3]);
        store.set_status_filter(Some(TaskStatus::Done));
        assert!(store.filtered().is_empty());
        store.set_search_query("");
        assert_eq!(ids(&store), vec![2]);
        store.clear_filters();
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }
}
