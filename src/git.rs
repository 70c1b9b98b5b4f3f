use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use git2::{BranchType, Repository};
use tracing::debug;

use crate::branches::BranchKind;
use crate::error::GitError;

/// Exit status `git ls-remote --exit-code` uses when no ref matched.
const LS_REMOTE_NO_MATCH: i32 = 2;

/// Everything the branch workflow needs from git.
pub trait GitBackend {
    /// Whether the working directory is inside a git repository.
    fn is_repository(&self) -> bool;

    /// Short names of all local branches.
    fn local_branches(&self) -> Result<Vec<String>, GitError>;

    /// Checked-out branch, `None` on a detached HEAD.
    fn current_branch(&self) -> Result<Option<String>, GitError>;

    /// Fetch from `remote`, pruning tracking refs that vanished upstream.
    fn fetch_prune(&self, remote: &str) -> Result<(), GitError>;

    /// Short names of all remote-tracking branches, e.g. `origin/feature`.
    fn remote_tracking_branches(&self) -> Result<Vec<String>, GitError>;

    /// Ask `remote` directly whether `refs/heads/<name>` exists.
    fn remote_branch_exists(&self, remote: &str, name: &str) -> Result<bool, GitError>;

    fn delete_local(&self, name: &str, force: bool) -> Result<(), GitError>;

    fn delete_remote(&self, remote: &str, name: &str) -> Result<(), GitError>;
}

/// [`GitBackend`] that shells out to the `git` executable on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command_line = format!("git {}", args.join(" "));
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        debug!(command = %command_line, "running git");
        let output = command.output().map_err(|source| GitError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(command = %command_line, status = %output.status, %stderr, "git failed");
            return Err(GitError::Failed {
                command: command_line,
                code: output.status.code(),
                stderr: if stderr.is_empty() {
                    "unknown error".to_string()
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Names from `git branch --format=%(refname)`. Anything outside
/// `refs/heads/`, such as the `(HEAD detached at ...)` entry, is skipped.
fn local_branch_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("refs/heads/"))
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl GitBackend for GitCli {
    fn is_repository(&self) -> bool {
        self.run(&["rev-parse", "--git-dir"]).is_ok()
    }

    fn local_branches(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["branch", "--format=%(refname)"])?;
        Ok(local_branch_names(&output))
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        let output = self.run(&["branch", "--show-current"])?;
        let name = output.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    fn fetch_prune(&self, remote: &str) -> Result<(), GitError> {
        self.run(&["fetch", "--prune", remote])?;
        Ok(())
    }

    fn remote_tracking_branches(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["branch", "-r", "--format=%(refname:short)"])?;
        Ok(non_empty_lines(&output))
    }

    fn remote_branch_exists(&self, remote: &str, name: &str) -> Result<bool, GitError> {
        let reference = format!("refs/heads/{name}");
        match self.run(&["ls-remote", "--exit-code", "--heads", remote, &reference]) {
            Ok(output) => Ok(output
                .lines()
                .any(|line| line.split('\t').nth(1) == Some(reference.as_str()))),
            Err(err) if err.code() == Some(LS_REMOTE_NO_MATCH) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn delete_local(&self, name: &str, force: bool) -> Result<(), GitError> {
        let flag = if force { "-D" } else { "-d" };
        self.run(&["branch", flag, name])?;
        Ok(())
    }

    fn delete_remote(&self, remote: &str, name: &str) -> Result<(), GitError> {
        self.run(&["push", remote, "--delete", name])?;
        Ok(())
    }
}

/// Tip commit metadata shown next to a branch in the picker.
#[derive(Debug, Clone)]
pub struct BranchDetail {
    pub summary: Option<String>,
    pub author: Option<String>,
    pub commit_timestamp: Option<i64>,
}

impl BranchDetail {
    pub fn age(&self, now: SystemTime) -> Option<Duration> {
        let timestamp = self.commit_timestamp?;
        let commit_time = UNIX_EPOCH.checked_add(Duration::from_secs(timestamp as u64))?;
        now.duration_since(commit_time).ok()
    }
}

pub fn open_repository(path: Option<&Path>) -> Option<Repository> {
    let dir = path.unwrap_or_else(|| Path::new("."));
    match Repository::discover(dir) {
        Ok(repo) => Some(repo),
        Err(err) => {
            debug!(dir = %dir.display(), %err, "libgit2 could not open repository; details disabled");
            None
        }
    }
}

/// Look up the tip commit of `name`. Remote branches resolve through the
/// `<remote>/<name>` tracking ref.
pub fn describe_branch(
    repo: &Repository,
    kind: BranchKind,
    remote: &str,
    name: &str,
) -> Option<BranchDetail> {
    let branch = match kind {
        BranchKind::Local => repo.find_branch(name, BranchType::Local),
        BranchKind::Remote => repo.find_branch(&format!("{remote}/{name}"), BranchType::Remote),
    }
    .ok()?;
    let commit = branch.into_reference().peel_to_commit().ok()?;

    let timestamp = commit.time().seconds();

    Some(BranchDetail {
        summary: commit.summary().map(|s| s.trim().to_string()),
        author: commit.author().name().map(|s| s.to_string()),
        commit_timestamp: (timestamp >= 0).then_some(timestamp),
    })
}
