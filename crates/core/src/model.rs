use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "to_do",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn from_completed(completed: bool) -> Self {
        if completed {
            TaskStatus::Done
        } else {
            TaskStatus::ToDo
        }
    }

    /// Next status in the select order, wrapping around.
    pub fn cycle_next(self) -> Self {
        match self {
            TaskStatus::ToDo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::ToDo,
        }
    }

    pub fn cycle_prev(self) -> Self {
        match self {
            TaskStatus::ToDo => TaskStatus::Done,
            TaskStatus::InProgress => TaskStatus::ToDo,
            TaskStatus::Done => TaskStatus::InProgress,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::ToDo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "to_do" | "todo" => Ok(TaskStatus::ToDo),
            "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(anyhow!(
                "Unknown status '{}': expected to_do|in_progress|done",
                s.trim()
            )),
        }
    }
}

impl ValueEnum for TaskStatus {
    fn value_variants<'a>() -> &'a [Self] {
        &TaskStatus::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// Input for a locally created task; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::ToDo,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description<T: Into<String>>(mut self, description: T) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One element of the remote todo feed. Unknown fields are ignored; the
/// optional ones are validated when the store is seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteTodo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub to_do: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn tally(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::ToDo => counts.to_do += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::ToDo => self.to_do,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }

    pub fn total(&self) -> usize {
        self.to_do + self.in_progress + self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("to do", TaskStatus::ToDo)]
    #[case("To Do", TaskStatus::ToDo)]
    #[case("to_do", TaskStatus::ToDo)]
    #[case("in progress", TaskStatus::InProgress)]
    #[case("In-Progress", TaskStatus::InProgress)]
    #[case("in_progress", TaskStatus::InProgress)]
    #[case(" DONE ", TaskStatus::Done)]
    fn parses_wire_and_label_forms(#[case] raw: &str, #[case] expected: TaskStatus) {
        assert_eq!(raw.parse::<TaskStatus>().unwrap(), expected);
    }

    #[rstest]
    #[case("blocked")]
    #[case("doing")]
    #[case("completed")]
    fn rejects_unknown_status(#[case] raw: &str) {
        let err = raw.parse::<TaskStatus>().unwrap_err();
        assert!(err.to_string().contains(&format!("Unknown status '{raw}'")));
    }

    #[test]
    fn completed_flag_maps_to_done_or_to_do() {
        assert_eq!(TaskStatus::from_completed(true), TaskStatus::Done);
        assert_eq!(TaskStatus::from_completed(false), TaskStatus::ToDo);
    }

    #[test]
    fn cycling_visits_every_status() {
        let mut status = TaskStatus::ToDo;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(status);
            status = status.cycle_next();
        }
        assert_eq!(seen, TaskStatus::ALL.to_vec());
        assert_eq!(status, TaskStatus::ToDo);
        assert_eq!(TaskStatus::ToDo.cycle_prev(), TaskStatus::Done);
    }

    #[test]
    fn counts_sum_to_collection_length() {
        let tasks: Vec<Task> = [TaskStatus::Done, TaskStatus::ToDo, TaskStatus::Done]
            .into_iter()
            .enumerate()
            .map(|(idx, status)| Task {
                id: idx as u64 + 1,
                title: format!("task {idx}"),
                description: None,
                status,
            })
            .collect();

        let counts = StatusCounts::tally(&tasks);
        assert_eq!(counts.get(TaskStatus::Done), 2);
        assert_eq!(counts.get(TaskStatus::InProgress), 0);
        assert_eq!(counts.total(), tasks.len());
    }

    #[test]
    fn remote_todo_ignores_unknown_fields() {
        let todo: RemoteTodo =
            serde_json::from_str(r#"{"userId":1,"id":3,"title":"fugiat","completed":true}"#)
                .unwrap();
        assert_eq!(todo.id, Some(3));
        assert_eq!(todo.title.as_deref(), Some("fugiat"));
        assert!(todo.completed);
        assert!(todo.description.is_none());
    }
}
