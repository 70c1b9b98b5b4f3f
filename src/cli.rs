use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::branches::BranchKind;

#[derive(Debug, Parser)]
#[command(
    name = "branch-sweep",
    about = "Interactively pick local or remote Git branches and delete them in one go",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Branch type to manage; prompts for it when omitted.
    #[arg(value_enum)]
    pub kind: Option<BranchKind>,

    /// Path to the Git repository (defaults to current directory).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub repo: Option<PathBuf>,

    /// Remote whose branches are listed and deleted.
    #[arg(short, long, env = "BRANCH_SWEEP_REMOTE", default_value = "origin")]
    pub remote: String,

    /// Delete local branches even if they are not fully merged.
    #[arg(short, long)]
    pub force: bool,

    /// Only list deletable branches without entering interactive selection.
    #[arg(long)]
    pub list_only: bool,

    /// Show what would happen without deleting.
    #[arg(long)]
    pub dry_run: bool,

    /// Report remote branches skipped because they no longer exist upstream.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Skipped remote branches are reported when asked for, or when the
    /// remote listing was requested directly on the command line.
    pub fn verbose_skips(&self) -> bool {
        self.verbose || self.kind == Some(BranchKind::Remote)
    }
}
