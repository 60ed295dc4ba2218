use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

const REMOTE_PREFIX: &str = "remotes/origin/";

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn git(&self, args: &[&str]) -> AppResult<String> {
        let command = args.join(" ");
        tracing::debug!(%command, cwd = %self.workspace_root.display(), "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| AppError::VersionControl {
                command: command.clone(),
                output: err.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::VersionControl {
                command,
                output: stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim_end().to_string())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn current_branch(&self) -> AppResult<String> {
        let branch = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(branch.trim().to_string())
    }

    async fn working_copy_changes(&self) -> AppResult<Vec<String>> {
        let output = self
            .git(&["status", "--porcelain", "--untracked-files=no"])
            .await?;
        Ok(output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn checkout(&self, branch: &str) -> AppResult<()> {
        self.git(&["checkout", branch]).await.map(|_| ())
    }

    async fn create_branch(&self, branch: &str) -> AppResult<()> {
        self.git(&["checkout", "-b", branch]).await.map(|_| ())
    }

    async fn list_branches(&self) -> AppResult<Vec<String>> {
        self.git(&["fetch", "-a"]).await?;
        let output = self.git(&["branch", "-a"]).await?;
        Ok(normalize_branch_listing(&output))
    }

    async fn push_upstream(&self, remote: &str, branch: &str) -> AppResult<String> {
        self.git(&["push", "--set-upstream", remote, branch]).await
    }
}

/// Collapses `git branch -a` output into unique names, newest-looking first.
fn normalize_branch_listing(output: &str) -> Vec<String> {
    let mut branches: Vec<String> = output
        .lines()
        .map(|line| line.replace('*', ""))
        .map(|line| line.trim().replace(REMOTE_PREFIX, ""))
        .filter(|line| !line.is_empty() && !line.contains("->"))
        .collect();
    branches.sort_unstable_by(|a, b| b.cmp(a));
    branches.dedup();
    branches
}
