use crate::context::AppContext;
use crate::domain::issue::Issue;
use crate::domain::workflow::{Transition, WorkflowAction};
use crate::error::AppResult;
use crate::services::Line;

/// Asks the user to confirm the transition `action` implies for `issue` and
/// posts it. Returns the transition that was actually requested.
pub async fn offer_transition(
    ctx: &AppContext,
    action: WorkflowAction,
    issue: &Issue,
) -> AppResult<Option<Transition>> {
    let Some(transition) = ctx.workflow.transition_for(action, &issue.status) else {
        tracing::debug!(key = %issue.key, status = %issue.status, ?action, "no transition applies");
        return Ok(None);
    };
    if issue.status.trim().eq_ignore_ascii_case(transition.target) {
        tracing::debug!(key = %issue.key, status = %issue.status, "already in target status");
        return Ok(None);
    }

    let question = format!(
        "Move {} from '{}' to '{}'?",
        issue.key, issue.status, transition.target
    );
    if !ctx.prompter.confirm(&question, true)? {
        return Ok(None);
    }

    ctx.issue_tracker
        .post_transition(&issue.id, transition.id)
        .await?;
    ctx.presenter.show(Line::status("status", transition.target));
    Ok(Some(transition))
}
