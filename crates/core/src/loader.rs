//! Runs the one-time initial load off the UI thread.
//!
//! The fetch happens on a background thread; the result comes back over a
//! channel and is applied to the [`TaskStore`] by whoever polls the
//! [`PendingLoad`], so every store mutation stays on the polling thread.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::anyhow;
use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::model::RemoteTodo;
use crate::source::TodoSource;
use crate::store::{LoadReport, TaskStore};

#[derive(Debug)]
pub struct LoadOutcome {
    pub source: String,
    pub result: anyhow::Result<Vec<RemoteTodo>>,
    pub finished_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded {
        source: String,
        report: LoadReport,
        at: DateTime<Local>,
    },
    Failed {
        source: String,
        at: DateTime<Local>,
    },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

pub struct PendingLoad {
    source: String,
    rx: Receiver<LoadOutcome>,
}

impl PendingLoad {
    /// Wrap an outcome that is already known.
    pub fn ready(outcome: LoadOutcome) -> Self {
        let (tx, rx) = mpsc::channel();
        let source = outcome.source.clone();
        let _ = tx.send(outcome);
        Self { source, rx }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Non-blocking check for the finished load.
    pub fn poll(&self) -> Option<LoadOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(LoadOutcome {
                source: self.source.clone(),
                result: Err(anyhow!("loader thread exited without a result")),
                finished_at: Local::now(),
            }),
        }
    }

    pub fn wait(self) -> LoadOutcome {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(_) => LoadOutcome {
                source: self.source,
                result: Err(anyhow!("loader thread exited without a result")),
                finished_at: Local::now(),
            },
        }
    }
}

pub fn spawn_load(source: Box<dyn TodoSource>) -> PendingLoad {
    let (tx, rx) = mpsc::channel();
    let description = source.describe();
    let label = description.clone();
    thread::spawn(move || {
        let result = source.fetch().map_err(anyhow::Error::from);
        let _ = tx.send(LoadOutcome {
            source: label,
            result,
            finished_at: Local::now(),
        });
    });
    PendingLoad {
        source: description,
        rx,
    }
}

/// Seed the store from a finished load. Failures are logged and leave the
/// store untouched.
pub fn apply_outcome(store: &mut TaskStore, outcome: LoadOutcome) -> LoadState {
    match outcome.result {
        Ok(items) => {
            let received = items.len();
            let report = store.load(items);
            info!(
                source = outcome.source.as_str(),
                received,
                loaded = report.loaded,
                dropped = report.dropped,
                "initial load finished"
            );
            LoadState::Loaded {
                source: outcome.source,
                report,
                at: outcome.finished_at,
            }
        }
        Err(err) => {
            let message = format!("{err:#}");
            error!(
                source = outcome.source.as_str(),
                error = %message,
                "initial load failed"
            );
            LoadState::Failed {
                source: outcome.source,
                at: outcome.finished_at,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FileSource, StaticSource};

    fn todo(id: u64, title: &str) -> RemoteTodo {
        RemoteTodo {
            id: Some(id),
            title: Some(title.into()),
            description: None,
            completed: false,
        }
    }

    #[test]
    fn background_load_seeds_store() {
        let pending = spawn_load(Box::new(StaticSource::new(vec![todo(1, "A")])));
        let outcome = pending.wait();
        let mut store = TaskStore::new();
        let state = apply_outcome(&mut store, outcome);

        assert!(matches!(
            state,
            LoadState::Loaded {
                report: LoadReport { loaded: 1, dropped: 0 },
                ..
            }
        ));
        assert_eq!(store.len(), 1);
        assert_eq!(store.counts().to_do, 1);
    }

    #[test]
    fn failed_load_leaves_store_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        let outcome = spawn_load(Box::new(source)).wait();
        let mut store = TaskStore::new();

        let state = apply_outcome(&mut store, outcome);
        assert!(matches!(state, LoadState::Failed { .. }));
        assert!(store.is_empty());
        assert!(store.filtered().is_empty());
    }

    #[test]
    fn ready_load_is_returned_on_first_poll() {
        let pending = PendingLoad::ready(LoadOutcome {
            source: "fixture".into(),
            result: Ok(vec![todo(5, "ready")]),
            finished_at: Local::now(),
        });
        assert_eq!(pending.source(), "fixture");
        let outcome = pending.poll().expect("outcome available");
        assert_eq!(outcome.result.unwrap().len(), 1);
    }
}
