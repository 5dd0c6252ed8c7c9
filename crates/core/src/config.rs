use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

use crate::source::{FileSource, HttpSource, TodoSource, DEFAULT_ENDPOINT};

static DEFAULT_LOG_NAME: &str = "tasklist.log";
static ENV_DATA_DIR: &str = "TASKLIST_DATA_DIR";
static ENV_ENDPOINT: &str = "TASKLIST_ENDPOINT";

pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_TOAST_SECS: u64 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "tasklist", "tasklist"));

/// Values supplied on the command line; `None` means "use the default".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub source_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<usize>,
    pub toast_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    log_path: PathBuf,
    endpoint: String,
    source_file: Option<PathBuf>,
    request_timeout: Duration,
    page_size: usize,
    toast_ttl: Duration,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data directory and endpoint from the
    /// provided overrides, environment variables, and platform defaults.
    pub fn discover(overrides: ConfigOverrides) -> Result<Self> {
        let data_dir = resolve_data_dir(overrides.data_dir.clone())?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }

        let endpoint = overrides
            .endpoint
            .clone()
            .or_else(|| env::var(ENV_ENDPOINT).ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let mut config = Self::from_data_dir(data_dir)?;
        config.endpoint = endpoint;
        config.apply(overrides)?;
        Ok(config)
    }

    /// Construct [`AppConfig`] with defaults rooted at an already resolved data directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        let log_path = data_dir.join(DEFAULT_LOG_NAME);
        Ok(Self {
            data_dir,
            log_path,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            source_file: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            toast_ttl: Duration::from_secs(DEFAULT_TOAST_SECS),
        })
    }

    fn apply(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(path) = overrides.source_file {
            self.source_file = Some(path);
        }
        if let Some(secs) = overrides.timeout_secs {
            if secs == 0 {
                bail!("Request timeout must be at least one second");
            }
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(size) = overrides.page_size {
            if !PAGE_SIZES.contains(&size) {
                bail!(
                    "Unsupported page size {}: expected one of 10|20|50|100",
                    size
                );
            }
            self.page_size = size;
        }
        if let Some(secs) = overrides.toast_secs {
            if secs == 0 {
                bail!("Toast duration must be at least one second");
            }
            self.toast_ttl = Duration::from_secs(secs);
        }
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn toast_ttl(&self) -> Duration {
        self.toast_ttl
    }

    /// The configured source: a local file when one was given, the HTTP endpoint otherwise.
    pub fn todo_source(&self) -> Box<dyn TodoSource> {
        match &self.source_file {
            Some(path) => Box::new(FileSource::new(path.clone())),
            None => Box::new(HttpSource::new(
                self.endpoint.clone(),
                self.request_timeout,
            )),
        }
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-tasklist");
        return Ok(dev_dir);
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".tasklist"));
    }

    Ok(env::current_dir()?.join(".tasklist"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_follow_the_table_widget_contract() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.page_size(), 20);
        assert_eq!(config.toast_ttl(), Duration::from_secs(3));
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.log_path(), dir.path().join("tasklist.log"));
        assert!(config.source_file().is_none());
    }

    #[test]
    fn discover_creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("logs");
        let config = AppConfig::discover(ConfigOverrides {
            data_dir: Some(nested.clone()),
            endpoint: Some("http://localhost:9/todos".into()),
            page_size: Some(50),
            ..ConfigOverrides::default()
        })
        .unwrap();

        assert!(nested.exists());
        assert_eq!(config.data_dir(), nested.as_path());
        assert_eq!(config.endpoint(), "http://localhost:9/todos");
        assert_eq!(config.page_size(), 50);
    }

    #[test]
    fn rejects_unsupported_page_size() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::discover(ConfigOverrides {
            data_dir: Some(dir.path().to_path_buf()),
            page_size: Some(25),
            ..ConfigOverrides::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Unsupported page size 25"));
    }

    #[test]
    fn rejects_zero_durations() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::discover(ConfigOverrides {
            data_dir: Some(dir.path().to_path_buf()),
            toast_secs: Some(0),
            ..ConfigOverrides::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn source_file_selects_file_source() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("todos.json");
        let config = AppConfig::discover(ConfigOverrides {
            data_dir: Some(dir.path().to_path_buf()),
            source_file: Some(file.clone()),
            ..ConfigOverrides::default()
        })
        .unwrap();
        assert_eq!(config.todo_source().describe(), file.display().to_string());
    }
}
