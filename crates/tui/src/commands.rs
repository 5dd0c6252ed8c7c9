use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::{CliCommand, ListArgs};
use crate::config::AppConfig;
use crate::core::TaskStore;
use crate::model::{StatusCounts, Task};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let source = config.todo_source();
    let items = source
        .fetch()
        .with_context(|| format!("failed to load tasks from {}", source.describe()))?;

    let mut store = TaskStore::new();
    let report = store.load(items);
    info!(
        loaded = report.loaded,
        dropped = report.dropped,
        "loaded tasks for listing"
    );

    if let Some(query) = &args.search {
        store.set_search_query(query);
    }
    store.set_status_filter(args.status);

    if args.json {
        let output = ListOutput {
            counts: store.counts(),
            total: store.len(),
            tasks: store.filtered(),
        };
        serde_json::to_writer_pretty(&mut writer, &output)?;
        writeln!(writer)?;
        return Ok(());
    }

    for task in store.filtered() {
        writeln!(writer, "{}", TaskLine(task))?;
    }
    writeln!(writer, "{}", CountsLine(store.counts()))?;
    writeln!(
        writer,
        "{}",
        ShowingLine {
            shown: store.filtered_len(),
            total: store.len(),
        }
    )?;
    Ok(())
}

#[derive(Serialize)]
struct ListOutput<'a> {
    counts: StatusCounts,
    total: usize,
    tasks: Vec<&'a Task>,
}

struct TaskLine<'a>(&'a Task);

impl fmt::Display for TaskLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.0;
        write!(f, "{:>5}  {:<11}  {}", task.id, task.status.label(), task.title)?;
        if let Some(description) = &task.description {
            write!(f, " — {}", description)?;
        }
        Ok(())
    }
}

struct CountsLine(StatusCounts);

impl fmt::Display for CountsLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "To Do: {} | In Progress: {} | Done: {}",
            self.0.to_do, self.0.in_progress, self.0.done
        )
    }
}

struct ShowingLine {
    shown: usize,
    total: usize,
}

impl fmt::Display for ShowingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            write!(f, "No tasks loaded")
        } else {
            write!(
                f,
                "Showing {} of {} task{}",
                self.shown,
                self.total,
                if self.total == 1 { "" } else { "s" }
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;
    use crate::model::TaskStatus;
    use tempfile::TempDir;

    fn config_with_todos(body: &str) -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let file = dir.path().join("todos.json");
        std::fs::write(&file, body).expect("write fixture");
        let config = AppConfig::discover(ConfigOverrides {
            data_dir: Some(dir.path().to_path_buf()),
            source_file: Some(file),
            ..ConfigOverrides::default()
        })
        .expect("config");
        (config, dir)
    }

    const FIXTURE: &str = r#"[
        {"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false},
        {"userId": 1, "id": 2, "title": "quis ut nam facilis", "completed": true},
        {"userId": 1, "id": 3, "title": "fugiat veniam minus", "completed": false}
    ]"#;

    #[test]
    fn list_prints_rows_and_counts() {
        let (config, _dir) = config_with_todos(FIXTURE);
        let mut output = Vec::new();
        execute(
            &config,
            CliCommand::List(ListArgs::default()),
            &mut output,
        )
        .expect("execute list");
        let output = String::from_utf8(output).expect("utf8");

        assert!(output.contains("delectus aut autem"));
        assert!(output.contains("To Do: 2 | In Progress: 0 | Done: 1"));
        assert!(output.contains("Showing 3 of 3 tasks"));
    }

    #[test]
    fn list_applies_search_and_status() {
        let (config, _dir) = config_with_todos(FIXTURE);
        let args = ListArgs {
            search: Some("VENIAM".into()),
            status: Some(TaskStatus::ToDo),
            json: false,
        };
        let mut output = Vec::new();
        execute(&config, CliCommand::List(args), &mut output).expect("execute list");
        let output = String::from_utf8(output).expect("utf8");

        assert!(output.contains("fugiat veniam minus"));
        assert!(!output.contains("delectus"));
        assert!(output.contains("Showing 1 of 3 tasks"));
    }

    #[test]
    fn list_emits_json() {
        let (config, _dir) = config_with_todos(FIXTURE);
        let args = ListArgs {
            search: None,
            status: Some(TaskStatus::Done),
            json: true,
        };
        let mut output = Vec::new();
        execute(&config, CliCommand::List(args), &mut output).expect("execute list");
        let value: serde_json::Value = serde_json::from_slice(&output).expect("json");

        assert_eq!(value["total"], 3);
        assert_eq!(value["counts"]["to_do"], 2);
        assert_eq!(value["tasks"][0]["id"], 2);
        assert_eq!(value["tasks"][0]["status"], "done");
    }

    #[test]
    fn list_reports_load_failures() {
        let (config, _dir) = config_with_todos("not json");
        let err = execute(
            &config,
            CliCommand::List(ListArgs::default()),
            Vec::new(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("failed to load tasks from"));
    }
}
