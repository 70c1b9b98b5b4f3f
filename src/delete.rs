use tracing::info;

use crate::branches::BranchKind;
use crate::git::GitBackend;

#[derive(Debug, Clone)]
pub struct DeleteResult {
    pub name: String,
    pub status: DeleteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    DryRun,
    Error(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    pub dry_run: bool,
    /// Delete local branches even when unmerged (`git branch -D`).
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Delete each branch in order. A failure is reported and the batch moves
/// on; nothing is rolled back.
pub fn delete_branches(
    git: &dyn GitBackend,
    kind: BranchKind,
    remote: &str,
    branches: &[String],
    options: DeleteOptions,
) -> Vec<DeleteResult> {
    let mut results = Vec::with_capacity(branches.len());

    for name in branches {
        if options.dry_run {
            println!("• Would delete {kind} branch '{name}'");
            results.push(DeleteResult {
                name: name.clone(),
                status: DeleteStatus::DryRun,
            });
            continue;
        }

        let outcome = match kind {
            BranchKind::Local => git.delete_local(name, options.force),
            BranchKind::Remote => git.delete_remote(remote, name),
        };

        let status = match outcome {
            Ok(()) => {
                info!(branch = %name, %kind, "deleted branch");
                println!("✅ Deleted {kind} branch '{name}'");
                DeleteStatus::Deleted
            }
            Err(err) => {
                eprintln!("❌ Failed to delete {kind} branch '{name}': {err}");
                DeleteStatus::Error(err.to_string())
            }
        };

        results.push(DeleteResult {
            name: name.clone(),
            status,
        });
    }

    results
}

pub fn summarize(results: &[DeleteResult]) -> DeleteSummary {
    results
        .iter()
        .fold(DeleteSummary::default(), |mut summary, result| {
            match result.status {
                DeleteStatus::Deleted | DeleteStatus::DryRun => summary.succeeded += 1,
                DeleteStatus::Error(_) => summary.failed += 1,
            }
            summary
        })
}

pub fn print_summary(results: &[DeleteResult], dry_run: bool) -> DeleteSummary {
    let summary = summarize(results);
    println!();
    if dry_run {
        println!("Dry run complete:");
        println!("• Would delete: {} branch(es)", summary.succeeded);
        return summary;
    }

    println!("Deletion complete:");
    println!("✅ Deleted: {} branch(es)", summary.succeeded);
    if summary.failed > 0 {
        let failed: Vec<&str> = results
            .iter()
            .filter(|result| matches!(result.status, DeleteStatus::Error(_)))
            .map(|result| result.name.as_str())
            .collect();
        println!("❌ Failed: {} branch(es): {}", summary.failed, failed.join(", "));
    }
    summary
}
