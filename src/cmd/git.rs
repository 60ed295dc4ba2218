use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::services::Line;
use crate::workflow::branch::switch_branch;
use crate::workflow::pull_request::{push_branch, raise_pull_request};

#[derive(Args, Debug, Clone)]
pub struct BranchArgs {
    /// Only list branches containing this text.
    pub filter: Option<String>,
}

pub async fn run_pull_request(ctx: &AppContext, ticket: Option<&str>) -> AppResult<()> {
    let outcome = raise_pull_request(ctx, ticket).await?;
    let summary = match &outcome.transition {
        Some(transition) => format!("{} ({})", outcome.title, transition.target),
        None => outcome.title.clone(),
    };
    tracing::info!(link = %outcome.link, "pull request prepared");
    ctx.presenter.show(Line::notice(summary));
    Ok(())
}

pub async fn run_push(ctx: &AppContext) -> AppResult<()> {
    push_branch(ctx).await.map(|_| ())
}

pub async fn run_branch(ctx: &AppContext, args: BranchArgs) -> AppResult<()> {
    switch_branch(ctx, args.filter.as_deref()).await.map(|_| ())
}
