use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    async fn current_branch(&self) -> AppResult<String>;
    /// Tracked files with uncommitted changes, one porcelain line each.
    async fn working_copy_changes(&self) -> AppResult<Vec<String>>;
    async fn checkout(&self, branch: &str) -> AppResult<()>;
    async fn create_branch(&self, branch: &str) -> AppResult<()>;
    /// Local and remote branch names after a fetch, without remote prefixes.
    async fn list_branches(&self) -> AppResult<Vec<String>>;
    async fn push_upstream(&self, remote: &str, branch: &str) -> AppResult<String>;

    async fn is_working_copy_clean(&self) -> AppResult<bool> {
        Ok(self.working_copy_changes().await?.is_empty())
    }
}
