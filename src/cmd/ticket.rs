use clap::{Args, ValueEnum};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::services::Line;
use crate::workflow::pull_request::{OpenTarget, open_target};
use crate::workflow::ticket::{describe_ticket, show_search, start_work};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Words to look for in ticket summaries, descriptions and comments.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct OpenArgs {
    /// What to open.
    #[arg(value_enum)]
    pub target: OpenKind,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OpenKind {
    /// The ticket page.
    Jira,
    /// The ticket on the rapid board.
    Board,
    /// The pull request compare page for the current branch.
    Pr,
}

impl From<OpenKind> for OpenTarget {
    fn from(kind: OpenKind) -> Self {
        match kind {
            OpenKind::Jira => OpenTarget::Jira,
            OpenKind::Board => OpenTarget::Board,
            OpenKind::Pr => OpenTarget::PullRequest,
        }
    }
}

pub async fn run_start(ctx: &AppContext, ticket: Option<&str>) -> AppResult<()> {
    let outcome = start_work(ctx, ticket).await?;
    let message = match (&outcome.branch, &outcome.transition) {
        (Some(branch), Some(transition)) => {
            format!(
                "{} is {} on {branch}",
                outcome.ticket.key, transition.target
            )
        }
        (Some(branch), None) => format!("{} checked out on {branch}", outcome.ticket.key),
        (None, _) => "no branch created".to_string(),
    };
    ctx.presenter.show(Line::notice(message));
    Ok(())
}

pub async fn run_describe(ctx: &AppContext, ticket: Option<&str>) -> AppResult<()> {
    describe_ticket(ctx, ticket).await.map(|_| ())
}

pub async fn run_search(ctx: &AppContext, args: SearchArgs) -> AppResult<()> {
    show_search(ctx, &args.text.join(" ")).await.map(|_| ())
}

pub async fn run_open(ctx: &AppContext, args: OpenArgs, ticket: Option<&str>) -> AppResult<()> {
    open_target(ctx, args.target.into(), ticket)
        .await
        .map(|_| ())
}
