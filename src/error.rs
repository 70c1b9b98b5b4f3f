use thiserror::Error;

/// Failure of a single `git` invocation.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl GitError {
    /// Exit code of the failed command, if it ran and exited normally.
    pub fn code(&self) -> Option<i32> {
        match self {
            GitError::Spawn { .. } => None,
            GitError::Failed { code, .. } => *code,
        }
    }
}
