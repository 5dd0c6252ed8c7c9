use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::RemoteTodo;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/todos";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode todo list from {location}: {source}")]
    Decode {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only provider of the initial todo list.
pub trait TodoSource: Send {
    fn fetch(&self) -> Result<Vec<RemoteTodo>, SourceError>;

    /// Where the items come from, for logs and the header.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new<T: Into<String>>(url: T, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl TodoSource for HttpSource {
    fn fetch(&self) -> Result<Vec<RemoteTodo>, SourceError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        debug!(url = self.url.as_str(), "fetching todo list");
        let response = agent
            .get(&self.url)
            .set("Accept", "application/json")
            .set("User-Agent", concat!("tasklist/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(|err| SourceError::Request {
                url: self.url.clone(),
                source: Box::new(err),
            })?;

        let body = response.into_string().map_err(|source| SourceError::Io {
            location: self.url.clone(),
            source,
        })?;
        decode_todos(&body, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl TodoSource for FileSource {
    fn fetch(&self) -> Result<Vec<RemoteTodo>, SourceError> {
        let location = self.path.display().to_string();
        let body = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            location: location.clone(),
            source,
        })?;
        decode_todos(&body, &location)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed items held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    items: Vec<RemoteTodo>,
}

impl StaticSource {
    pub fn new(items: Vec<RemoteTodo>) -> Self {
        Self { items }
    }
}

impl TodoSource for StaticSource {
    fn fetch(&self) -> Result<Vec<RemoteTodo>, SourceError> {
        Ok(self.items.clone())
    }

    fn describe(&self) -> String {
        String::from("static items")
    }
}

/// Decode a JSON array of todos. Elements that are not decodable objects are
/// skipped; a body that is not an array is an error.
pub fn decode_todos(body: &str, location: &str) -> Result<Vec<RemoteTodo>, SourceError> {
    let values: Vec<Value> = serde_json::from_str(body).map_err(|source| SourceError::Decode {
        location: location.to_string(),
        source,
    })?;

    let mut todos = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RemoteTodo>(value) {
            Ok(todo) => todos.push(todo),
            Err(err) => warn!(index, error = %err, "skipping undecodable todo"),
        }
    }
    Ok(todos)
}
