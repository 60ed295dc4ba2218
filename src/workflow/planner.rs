use crate::config::non_empty;
use crate::context::AppContext;
use crate::domain::issue::{Issue, Sprint};
use crate::domain::query::{plan_active_work, text_search};
use crate::error::{AppError, AppResult};

/// The board's active sprint. When the tracker reports several, the first one
/// it returns is used.
pub async fn active_sprint(ctx: &AppContext, board_id: &str) -> AppResult<Sprint> {
    let sprints = ctx.issue_tracker.active_sprints(board_id).await?;
    if sprints.len() > 1 {
        tracing::debug!(
            count = sprints.len(),
            board_id,
            "several active sprints, using the first"
        );
    }
    let sprint = sprints
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NoActiveSprint(board_id.to_string()))?;
    tracing::debug!(sprint = %sprint.name, id = sprint.id, state = %sprint.state, "active sprint");
    Ok(sprint)
}

/// Tickets assigned to `user_id` in `sprint`, trying each ready status in
/// turn until one yields results.
pub async fn find_assigned_work(
    ctx: &AppContext,
    sprint: &Sprint,
    user_id: &str,
) -> AppResult<Vec<Issue>> {
    let attempts = plan_active_work(sprint, user_id, &ctx.config.ready_statuses());
    let mut tried = Vec::with_capacity(attempts.len());

    for attempt in attempts {
        let issues = ctx.issue_tracker.search_issues(&attempt.jql).await?;
        if !issues.is_empty() {
            tracing::debug!(status = %attempt.status, found = issues.len(), "assigned work found");
            return Ok(issues);
        }
        tracing::debug!(status = %attempt.status, "no assigned work, falling back");
        tried.push(attempt.status);
    }

    Err(AppError::NoAssignedWork { tried })
}

pub async fn search_tickets(ctx: &AppContext, text: &str) -> AppResult<Vec<(String, String)>> {
    let jql = text_search(text, non_empty(ctx.config.default_project_key()));
    let issues = ctx.issue_tracker.search_issues(&jql).await?;
    Ok(issues
        .into_iter()
        .map(|issue| (issue.key, issue.summary))
        .collect())
}
