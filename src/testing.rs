//! In-memory stand-ins for git and the terminal, used by unit tests.

use std::sync::Mutex;

use anyhow::Result;

use crate::branches::{BranchEntry, BranchKind};
use crate::error::GitError;
use crate::git::GitBackend;
use crate::prompt::Prompter;

fn failure(command: &str) -> GitError {
    GitError::Failed {
        command: command.to_string(),
        code: Some(1),
        stderr: "fatal: simulated failure".to_string(),
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub struct FakeGit {
    is_repo: bool,
    local: Option<Vec<String>>,
    current: Option<String>,
    current_fails: bool,
    fetch_fails: bool,
    remote_tracking: Option<Vec<String>>,
    upstream: Vec<String>,
    unreachable: Vec<String>,
    failing_deletes: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeGit {
    /// A repository with no branches where every listing fails until
    /// configured.
    pub fn new() -> Self {
        Self {
            is_repo: true,
            local: None,
            current: None,
            current_fails: false,
            fetch_fails: false,
            remote_tracking: None,
            upstream: Vec::new(),
            unreachable: Vec::new(),
            failing_deletes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn outside_repository() -> Self {
        Self {
            is_repo: false,
            ..Self::new()
        }
    }

    pub fn with_local(mut self, names: &[&str]) -> Self {
        self.local = Some(owned(names));
        self
    }

    pub fn with_local_failing(mut self) -> Self {
        self.local = None;
        self
    }

    pub fn with_current(mut self, name: &str) -> Self {
        self.current = Some(name.to_string());
        self
    }

    pub fn with_current_failing(mut self) -> Self {
        self.current_fails = true;
        self
    }

    pub fn with_fetch_failing(mut self) -> Self {
        self.fetch_fails = true;
        self
    }

    pub fn with_remote_tracking(mut self, names: &[&str]) -> Self {
        self.remote_tracking = Some(owned(names));
        self
    }

    pub fn with_upstream(mut self, names: &[&str]) -> Self {
        self.upstream = owned(names);
        self
    }

    pub fn with_unreachable_check(mut self, name: &str) -> Self {
        self.unreachable.push(name.to_string());
        self
    }

    pub fn with_failing_delete(mut self, name: &str) -> Self {
        self.failing_deletes.push(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("delete"))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GitBackend for FakeGit {
    fn is_repository(&self) -> bool {
        self.is_repo
    }

    fn local_branches(&self) -> Result<Vec<String>, GitError> {
        self.local.clone().ok_or_else(|| failure("git branch"))
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        if self.current_fails {
            return Err(failure("git branch --show-current"));
        }
        Ok(self.current.clone())
    }

    fn fetch_prune(&self, remote: &str) -> Result<(), GitError> {
        self.record(format!("fetch --prune {remote}"));
        if self.fetch_fails {
            return Err(failure("git fetch --prune"));
        }
        Ok(())
    }

    fn remote_tracking_branches(&self) -> Result<Vec<String>, GitError> {
        self.remote_tracking
            .clone()
            .ok_or_else(|| failure("git branch -r"))
    }

    fn remote_branch_exists(&self, remote: &str, name: &str) -> Result<bool, GitError> {
        self.record(format!("ls-remote {remote} {name}"));
        if self.unreachable.iter().any(|n| n == name) {
            return Err(failure("git ls-remote"));
        }
        Ok(self.upstream.iter().any(|n| n == name))
    }

    fn delete_local(&self, name: &str, force: bool) -> Result<(), GitError> {
        let flag = if force { "-D" } else { "-d" };
        self.record(format!("delete-local {flag} {name}"));
        if self.failing_deletes.iter().any(|n| n == name) {
            return Err(failure("git branch -d"));
        }
        Ok(())
    }

    fn delete_remote(&self, remote: &str, name: &str) -> Result<(), GitError> {
        self.record(format!("delete-remote {remote} {name}"));
        if self.failing_deletes.iter().any(|n| n == name) {
            return Err(failure("git push --delete"));
        }
        Ok(())
    }
}

/// Prompter that answers from a script and remembers what it was shown.
pub struct ScriptedPrompter {
    kind: Option<BranchKind>,
    selection: Vec<String>,
    confirm: bool,
    pub kind_prompted: bool,
    pub offered: Option<Vec<String>>,
    pub confirm_prompted: bool,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self {
            kind: None,
            selection: Vec::new(),
            confirm: false,
            kind_prompted: false,
            offered: None,
            confirm_prompted: false,
        }
    }

    pub fn choosing_kind(mut self, kind: BranchKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn selecting(mut self, names: &[&str]) -> Self {
        self.selection = owned(names);
        self
    }

    pub fn confirming(mut self, answer: bool) -> Self {
        self.confirm = answer;
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn select_kind(&mut self) -> Result<Option<BranchKind>> {
        self.kind_prompted = true;
        Ok(self.kind)
    }

    fn select_branches(&mut self, _kind: BranchKind, candidates: &[BranchEntry]) -> Result<Vec<String>> {
        self.offered = Some(candidates.iter().map(|entry| entry.name.clone()).collect());
        Ok(self
            .selection
            .iter()
            .filter(|name| candidates.iter().any(|entry| entry.name == **name))
            .cloned()
            .collect())
    }

    fn confirm(&mut self, _kind: BranchKind, _selected: &[String]) -> Result<bool> {
        self.confirm_prompted = true;
        Ok(self.confirm)
    }
}
