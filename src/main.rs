mod app;
mod branches;
mod cli;
mod delete;
mod error;
mod git;
mod prompt;
mod run;
#[cfg(test)]
mod testing;
mod tui;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::Cli;
use crate::delete::DeleteOptions;
use crate::git::{GitCli, open_repository};
use crate::prompt::TerminalPrompter;
use crate::run::{Outcome, Settings, run_flow};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(Outcome::NotARepository) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "run aborted");
            eprintln!("❌ {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let verbose_skips = cli.verbose_skips();
    let repo = open_repository(cli.repo.as_deref());
    let git = GitCli::new(cli.repo);

    let settings = Settings {
        kind: cli.kind,
        remote: cli.remote,
        verbose_skips,
        list_only: cli.list_only,
        delete: DeleteOptions {
            dry_run: cli.dry_run,
            force: cli.force,
        },
    };

    run_flow(&git, &mut TerminalPrompter, repo.as_ref(), &settings)
}
