use crate::model::{Task, TaskStatus};

/// Search and status criteria applied to the full collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    query: Option<String>,
    status: Option<TaskStatus>,
}

impl FilterCriteria {
    pub fn new(query: Option<&str>, status: Option<TaskStatus>) -> Self {
        let mut criteria = Self::default();
        criteria.set_query(query.unwrap_or_default());
        criteria.status = status;
        criteria
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Blank input clears the query.
    pub fn set_query(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.query = None;
        } else {
            self.query = Some(query.to_string());
        }
    }

    pub fn set_status(&mut self, status: Option<TaskStatus>) {
        self.status = status;
    }

    pub fn clear(&mut self) {
        self.query = None;
        self.status = None;
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.status.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }

        true
    }

    /// Indices into `tasks` of every matching task, in collection order.
    pub fn select(&self, tasks: &[Task]) -> Vec<usize> {
        tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| self.matches(task))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut parts = Vec::new();
        if let Some(query) = &self.query {
            parts.push(format!("search:\"{query}\""));
        }
        if let Some(status) = self.status {
            parts.push(format!("status:{}", status.label()));
        }
        Some(parts.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: u64, title: &str, description: Option<&str>, status: TaskStatus) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            status,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", None, TaskStatus::ToDo),
            task(2, "Write report", Some("quarterly MILK numbers"), TaskStatus::Done),
            task(3, "Call plumber", None, TaskStatus::InProgress),
            task(4, "Review budget", Some("numbers"), TaskStatus::Done),
        ]
    }

    #[test]
    fn query_matches_title_or_description_case_insensitively() {
        let criteria = FilterCriteria::new(Some("milk"), None);
        assert_eq!(criteria.select(&sample()), vec![0, 1]);
    }

    #[test]
    fn query_is_a_substring_not_a_token_match() {
        let criteria = FilterCriteria::new(Some("LUMB"), None);
        assert_eq!(criteria.select(&sample()), vec![2]);
    }

    #[test]
    fn status_and_query_combine() {
        let criteria = FilterCriteria::new(Some("numbers"), Some(TaskStatus::Done));
        assert_eq!(criteria.select(&sample()), vec![1, 3]);

        let criteria = FilterCriteria::new(Some("milk"), Some(TaskStatus::Done));
        assert_eq!(criteria.select(&sample()), vec![1]);
    }

    #[test]
    fn clearing_one_criterion_restores_tasks_excluded_only_by_it() {
        let tasks = sample();
        let mut criteria = FilterCriteria::new(Some("milk"), Some(TaskStatus::Done));
        criteria.set_status(None);
        assert_eq!(
            criteria.select(&tasks),
            FilterCriteria::new(Some("milk"), None).select(&tasks)
        );

        let mut criteria = FilterCriteria::new(Some("milk"), Some(TaskStatus::Done));
        criteria.set_query("");
        assert_eq!(
            criteria.select(&tasks),
            FilterCriteria::new(None, Some(TaskStatus::Done)).select(&tasks)
        );
    }

    #[test]
    fn blank_query_is_no_query() {
        let criteria = FilterCriteria::new(Some("   "), None);
        assert!(criteria.is_empty());
        assert_eq!(criteria.select(&sample()).len(), 4);
    }

    #[test]
    fn summary_lists_active_criteria() {
        assert_eq!(FilterCriteria::default().summary(), None);
        let criteria = FilterCriteria::new(Some("milk"), Some(TaskStatus::InProgress));
        assert_eq!(
            criteria.summary().as_deref(),
            Some("search:\"milk\" | status:In Progress")
        );
    }
}
