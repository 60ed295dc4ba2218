use async_trait::async_trait;

use crate::domain::issue::{Issue, Sprint};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn get_issue(&self, key: &str) -> AppResult<Issue>;
    async fn search_issues(&self, jql: &str) -> AppResult<Vec<Issue>>;
    async fn post_transition(&self, issue_id: &str, transition_id: &str) -> AppResult<()>;
    async fn active_sprints(&self, board_id: &str) -> AppResult<Vec<Sprint>>;
}
