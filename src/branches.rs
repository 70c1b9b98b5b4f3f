use std::fmt;

use clap::ValueEnum;
use tracing::{debug, warn};

use crate::git::{BranchDetail, GitBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BranchKind {
    /// Branches under refs/heads.
    Local,
    /// Branches on the remote, deleted with `git push --delete`.
    Remote,
}

impl BranchKind {
    pub const ALL: [BranchKind; 2] = [BranchKind::Local, BranchKind::Remote];

    pub fn label(self) -> &'static str {
        match self {
            BranchKind::Local => "local",
            BranchKind::Remote => "remote",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A deletion candidate as offered to the user.
#[derive(Debug, Clone)]
pub struct BranchEntry {
    pub name: String,
    pub detail: Option<BranchDetail>,
}

impl BranchEntry {
    #[cfg(test)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: None,
        }
    }
}

/// Local branch names. A listing failure is reported and treated as "no
/// branches".
pub fn list_local(git: &dyn GitBackend) -> Vec<String> {
    match git.local_branches() {
        Ok(branches) => branches,
        Err(err) => {
            eprintln!("❌ Failed to list local branches: {err}");
            Vec::new()
        }
    }
}

/// Branch names that still exist on `remote`.
///
/// Tracking refs are refreshed with `fetch --prune` first, then each
/// candidate is confirmed against the remote itself since tracking refs
/// can lag behind it. Unconfirmed names are dropped, and reported only
/// when `verbose` is set.
pub fn list_remote(git: &dyn GitBackend, remote: &str, verbose: bool) -> Vec<String> {
    if let Err(err) = git.fetch_prune(remote) {
        warn!(%remote, %err, "fetch --prune failed; using existing tracking refs");
    }

    let tracking = match git.remote_tracking_branches() {
        Ok(tracking) => tracking,
        Err(err) => {
            eprintln!("❌ Failed to list remote branches: {err}");
            return Vec::new();
        }
    };

    let prefix = format!("{remote}/");
    let candidates = tracking
        .iter()
        .filter_map(|short| short.strip_prefix(&prefix))
        .filter(|name| !name.is_empty() && *name != "HEAD");

    let mut valid = Vec::new();
    for name in candidates {
        let exists = match git.remote_branch_exists(remote, name) {
            Ok(exists) => exists,
            Err(err) => {
                debug!(%remote, branch = name, %err, "remote existence check failed");
                false
            }
        };

        if exists {
            valid.push(name.to_string());
        } else {
            debug!(%remote, branch = name, "skipping branch missing upstream");
            if verbose {
                println!("⚠️  Skipping remote branch no longer on {remote}: {name}");
            }
        }
    }
    valid
}

/// Drop the checked-out branch from `branches`. If the current branch
/// cannot be determined the list is returned unchanged.
pub fn without_current(git: &dyn GitBackend, mut branches: Vec<String>) -> Vec<String> {
    match git.current_branch() {
        Ok(Some(current)) => branches.retain(|branch| *branch != current),
        Ok(None) => debug!("detached HEAD; no current branch to exclude"),
        Err(err) => debug!(%err, "could not resolve current branch"),
    }
    branches
}
