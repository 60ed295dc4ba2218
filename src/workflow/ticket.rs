use crate::context::AppContext;
use crate::domain::branch::BranchDescriptor;
use crate::domain::issue::Issue;
use crate::domain::ticket::parse_explicit;
use crate::domain::workflow::{Transition, WorkflowAction};
use crate::error::{AppError, AppResult};
use crate::services::Line;
use crate::workflow::planner::{active_sprint, find_assigned_work, search_tickets};
use crate::workflow::resolve::resolve_ticket;
use crate::workflow::transition::offer_transition;

pub struct StartWorkOutcome {
    pub ticket: Issue,
    pub branch: Option<BranchDescriptor>,
    pub transition: Option<Transition>,
}

/// Picks a ticket (the explicit one, or one of the user's assigned tickets in
/// the active sprint), creates its branch and offers to move it in progress.
pub async fn start_work(ctx: &AppContext, explicit: Option<&str>) -> AppResult<StartWorkOutcome> {
    let changes = ctx.version_control.working_copy_changes().await?;
    if !changes.is_empty() {
        return Err(AppError::DirtyWorkingCopy(changes));
    }

    let default_project = ctx.config.default_project_key();
    let sprint = active_sprint(ctx, ctx.config.board_id()?).await?;
    ctx.presenter.show(Line::status("sprint", sprint.name.clone()));

    let issue = match explicit {
        Some(token) => {
            let ticket = parse_explicit(token, default_project)?;
            ctx.issue_tracker.get_issue(&ticket.to_string()).await?
        }
        None => {
            let user_id = ctx.config.user_id()?;
            let candidates = find_assigned_work(ctx, &sprint, user_id).await?;
            choose_ticket(ctx, candidates)?
        }
    };

    let ticket = parse_explicit(&issue.key, default_project)?;
    let branch = BranchDescriptor::from_parts(&sprint.number(), &ticket, &issue.summary);
    let branch_name = branch.to_string();
    ctx.presenter.show(Line::status("branch", branch_name.clone()));

    if !ctx
        .prompter
        .confirm(&format!("Create branch {branch_name}?"), true)?
    {
        return Ok(StartWorkOutcome {
            ticket: issue,
            branch: None,
            transition: None,
        });
    }
    ctx.version_control.create_branch(&branch_name).await?;
    tracing::info!(branch = %branch_name, "branch created");

    let transition = offer_transition(ctx, WorkflowAction::StartWork, &issue).await?;
    Ok(StartWorkOutcome {
        ticket: issue,
        branch: Some(branch),
        transition,
    })
}

fn choose_ticket(ctx: &AppContext, mut candidates: Vec<Issue>) -> AppResult<Issue> {
    let items: Vec<String> = candidates
        .iter()
        .map(|issue| format!("{} {}", issue.key, issue.summary))
        .collect();
    let index = ctx
        .prompter
        .select("Which ticket?", &items)?
        .filter(|index| *index < candidates.len())
        .ok_or(AppError::Cancelled)?;
    Ok(candidates.swap_remove(index))
}

/// Shows the ticket header, description and comment thread.
pub async fn describe_ticket(ctx: &AppContext, explicit: Option<&str>) -> AppResult<Issue> {
    let resolved = resolve_ticket(ctx, explicit).await?;
    let issue = ctx
        .issue_tracker
        .get_issue(&resolved.ticket.to_string())
        .await?;

    ctx.presenter.show(Line::Ticket {
        key: issue.key.clone(),
        summary: issue.summary.clone(),
        status: Some(issue.status.clone()).filter(|status| !status.is_empty()),
    });
    let details = [
        ("pr", issue.pull_request_state.clone()),
        ("points", issue.points.map(|_| issue.points_label())),
        ("epic", issue.epic.clone()),
        ("assignee", issue.assignee.clone()),
        (
            "next",
            ctx.workflow
                .by_name(&issue.status)
                .and_then(|status| ctx.workflow.next_of(status))
                .map(|next| next.name.to_string()),
        ),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            ctx.presenter.show(Line::status(label, value));
        }
    }
    if let Some(description) = &issue.description {
        ctx.presenter.show(Line::Body(description.clone()));
    }
    for comment in &issue.comments {
        ctx.presenter.show(Line::Comment {
            updated: comment.updated.clone(),
            author: comment.author.clone(),
            body: comment.body.clone(),
        });
    }

    Ok(issue)
}

pub async fn show_search(ctx: &AppContext, text: &str) -> AppResult<usize> {
    let found = search_tickets(ctx, text).await?;
    if found.is_empty() {
        let message = format!("no tickets match '{}'", text.trim());
        ctx.presenter.show(Line::notice(message));
    }
    for (key, summary) in &found {
        ctx.presenter.show(Line::Ticket {
            key: key.clone(),
            summary: summary.clone(),
            status: None,
        });
    }
    Ok(found.len())
}
