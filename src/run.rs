use std::time::SystemTime;

use anyhow::Result;
use git2::Repository;
use tracing::debug;

use crate::app::format_age;
use crate::branches::{self, BranchEntry, BranchKind};
use crate::delete::{self, DeleteOptions, DeleteSummary};
use crate::git::{GitBackend, describe_branch};
use crate::prompt::Prompter;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Preselected branch type; prompted for when `None`.
    pub kind: Option<BranchKind>,
    pub remote: String,
    pub verbose_skips: bool,
    pub list_only: bool,
    pub delete: DeleteOptions,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NotARepository,
    Cancelled,
    NothingToDelete,
    Listed,
    Completed(DeleteSummary),
}

/// Walk the user from branch type to deletion report. Every early stop
/// prints its reason and returns the matching [`Outcome`].
pub fn run_flow(
    git: &dyn GitBackend,
    prompter: &mut dyn Prompter,
    repo: Option<&Repository>,
    settings: &Settings,
) -> Result<Outcome> {
    if !git.is_repository() {
        eprintln!("❌ Not inside a git repository");
        return Ok(Outcome::NotARepository);
    }

    let kind = match settings.kind {
        Some(kind) => kind,
        None => match prompter.select_kind()? {
            Some(kind) => kind,
            None => return Ok(cancelled()),
        },
    };
    debug!(%kind, remote = %settings.remote, "listing branches");

    let mut names = match kind {
        BranchKind::Local => branches::list_local(git),
        BranchKind::Remote => branches::list_remote(git, &settings.remote, settings.verbose_skips),
    };
    if names.is_empty() {
        println!("No {kind} branches found.");
        return Ok(Outcome::NothingToDelete);
    }

    if kind == BranchKind::Local {
        names = branches::without_current(git, names);
    }
    if names.is_empty() {
        println!("No {kind} branches available to delete.");
        return Ok(Outcome::NothingToDelete);
    }

    let candidates: Vec<BranchEntry> = names
        .into_iter()
        .map(|name| {
            let detail = repo.and_then(|repo| describe_branch(repo, kind, &settings.remote, &name));
            BranchEntry { name, detail }
        })
        .collect();

    if settings.list_only {
        print_branch_listing(kind, &candidates);
        return Ok(Outcome::Listed);
    }

    let selected = prompter.select_branches(kind, &candidates)?;
    if selected.is_empty() {
        return Ok(cancelled());
    }

    println!("\nSelected {kind} branches:");
    for name in &selected {
        println!("  - {name}");
    }

    if !prompter.confirm(kind, &selected)? {
        return Ok(cancelled());
    }

    println!("\nDeleting {} branch(es)...\n", selected.len());
    let results = delete::delete_branches(git, kind, &settings.remote, &selected, settings.delete);
    let summary = delete::print_summary(&results, settings.delete.dry_run);

    Ok(Outcome::Completed(summary))
}

fn cancelled() -> Outcome {
    println!("Operation cancelled.");
    Outcome::Cancelled
}

fn print_branch_listing(kind: BranchKind, branches: &[BranchEntry]) {
    let now = SystemTime::now();
    println!("Deletable {kind} branches:");
    for branch in branches {
        let Some(detail) = &branch.detail else {
            println!("  {}", branch.name);
            continue;
        };
        let age = detail
            .age(now)
            .map(|age| format!("{} ago", format_age(age)))
            .unwrap_or_default();
        match &detail.author {
            Some(author) => println!("  {:<24} {:<12} {}", branch.name, age, author),
            None => println!("  {:<24} {}", branch.name, age),
        }
        if let Some(summary) = &detail.summary {
            println!("      {summary}");
        }
    }
}
