use crate::config::StoredConfig;
use crate::context::AppContext;
use crate::domain::ticket::TicketReference;
use crate::domain::workflow::{Transition, WorkflowAction};
use crate::error::{AppError, AppResult};
use crate::services::Line;
use crate::workflow::resolve::{resolve, resolve_ticket};
use crate::workflow::transition::offer_transition;

pub struct PullRequestOutcome {
    pub link: String,
    pub title: String,
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    Jira,
    Board,
    PullRequest,
}

pub fn compare_url(config: &StoredConfig, branch: &str) -> AppResult<String> {
    Ok(format!(
        "https://{}/{}/compare/{}...{}:{}",
        config.github.host.trim(),
        config.github_repo()?,
        config.github.main_branch.trim(),
        config.github_owner()?,
        branch
    ))
}

pub fn browse_url(config: &StoredConfig, ticket: &TicketReference) -> String {
    format!("{}/browse/{}", config.jira_base_url(), ticket)
}

pub fn board_url(config: &StoredConfig, ticket: &TicketReference) -> AppResult<String> {
    Ok(format!(
        "{}/secure/RapidBoard.jspa?rapidView={}&view=detail&selectedIssue={}",
        config.jira_base_url(),
        config.board_id()?,
        ticket
    ))
}

/// Prints the compare link for the current branch, copies a ticket-derived
/// title, offers the review transition and finally offers to open the link.
pub async fn raise_pull_request(
    ctx: &AppContext,
    explicit: Option<&str>,
) -> AppResult<PullRequestOutcome> {
    let branch = ctx.version_control.current_branch().await?;
    let link = compare_url(&ctx.config, &branch)?;
    ctx.presenter.show(Line::Heading("Pull Request".to_string()));
    ctx.presenter.show(Line::status("link", link.clone()));

    let resolved = resolve(
        explicit,
        || async move { Ok::<_, AppError>(branch) },
        ctx.config.default_project_key(),
    )
    .await?;
    let issue = ctx
        .issue_tracker
        .get_issue(&resolved.ticket.to_string())
        .await?;

    let title = issue.pull_request_title();
    ctx.presenter.show(Line::status("name", title.clone()));
    match ctx.desktop.copy_text(&title) {
        Ok(()) => ctx
            .presenter
            .show(Line::notice("copied the name to your clipboard")),
        Err(err) => tracing::warn!(error = %err, "could not copy pull request name"),
    }

    let action = WorkflowAction::AdvanceOnPullRequest;
    let transition = offer_transition(ctx, action, &issue).await?;

    if ctx
        .prompter
        .confirm("Open the pull request page in your browser?", true)?
    {
        ctx.desktop.open_url(&link)?;
    }

    Ok(PullRequestOutcome {
        link,
        title,
        transition,
    })
}

pub async fn push_branch(ctx: &AppContext) -> AppResult<String> {
    let branch = ctx.version_control.current_branch().await?;
    let remote = ctx.config.github.remote.trim();
    let command = format!("git push --set-upstream {remote} {branch}");
    ctx.presenter.show(Line::Body(command));
    let output = ctx.version_control.push_upstream(remote, &branch).await?;
    if !output.is_empty() {
        ctx.presenter.show(Line::Body(output));
    }
    Ok(branch)
}

pub async fn open_target(
    ctx: &AppContext,
    target: OpenTarget,
    explicit: Option<&str>,
) -> AppResult<String> {
    let url = match target {
        OpenTarget::Jira => browse_url(&ctx.config, &resolve_ticket(ctx, explicit).await?.ticket),
        OpenTarget::Board => board_url(&ctx.config, &resolve_ticket(ctx, explicit).await?.ticket)?,
        OpenTarget::PullRequest => {
            let branch = ctx.version_control.current_branch().await?;
            compare_url(&ctx.config, &branch)?
        }
    };
    tracing::debug!(%url, ?target, "opening");
    ctx.desktop.open_url(&url)?;
    Ok(url)
}
