use anyhow::Result;
use clap::Parser;

use tasklist::logging::{init_tracing, LogTarget};

fn main() -> Result<()> {
    let cli = tasklist::cli::Cli::parse();
    let config = tasklist::config::from_cli(&cli)?;

    match cli.command.clone() {
        Some(tasklist::cli::CliCommand::Tui) | None => {
            init_tracing(
                cli.log_filter.as_deref(),
                LogTarget::File(config.log_path().to_path_buf()),
            )?;
            tasklist::tui::run(config)?;
        }
        Some(command) => {
            init_tracing(cli.log_filter.as_deref(), LogTarget::Stderr)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tasklist::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
