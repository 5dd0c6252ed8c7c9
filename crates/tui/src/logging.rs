use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Where log lines go. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, Clone)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// A single directive becomes the default under `RUST_LOG`; a comma list is
/// taken as the whole filter.
fn build_filter(filter: Option<&str>) -> Result<EnvFilter> {
    match filter {
        Some(spec) if spec.contains(',') => EnvFilter::try_new(spec)
            .with_context(|| format!("invalid log filter '{spec}'")),
        _ => {
            let directive: Directive = filter.unwrap_or("info").parse()?;
            Ok(EnvFilter::builder()
                .with_default_directive(directive)
                .from_env_lossy())
        }
    }
}

pub fn init_tracing(filter: Option<&str>, target: LogTarget) -> Result<()> {
    let env_filter = build_filter(filter)?;

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .try_init();
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_directive() {
        assert!(build_filter(Some("debug")).is_ok());
        assert!(build_filter(None).is_ok());
    }

    #[test]
    fn accepts_comma_separated_directives() {
        let filter = build_filter(Some("info,tasklist_core=debug")).unwrap();
        assert!(filter.to_string().contains("tasklist_core=debug"));
    }
}
