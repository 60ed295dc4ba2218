use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::services::Line;

/// Lists branches matching `filter`, lets the user pick one and checks it out
/// when the working copy is clean.
pub async fn switch_branch(ctx: &AppContext, filter: Option<&str>) -> AppResult<Option<String>> {
    let mut branches = ctx.version_control.list_branches().await?;
    if let Some(filter) = filter.map(str::trim).filter(|filter| !filter.is_empty()) {
        branches.retain(|branch| branch.contains(filter));
    }
    if branches.is_empty() {
        ctx.presenter.show(Line::notice("no branches found"));
        return Ok(None);
    }

    let Some(index) = ctx.prompter.select("What branch?", &branches)? else {
        return Ok(None);
    };
    let Some(branch) = branches.get(index).cloned() else {
        return Ok(None);
    };

    if !ctx.version_control.is_working_copy_clean().await? {
        let changes = ctx.version_control.working_copy_changes().await?;
        return Err(AppError::DirtyWorkingCopy(changes));
    }
    ctx.version_control.checkout(&branch).await?;
    ctx.presenter.show(Line::status("branch", branch.clone()));
    Ok(Some(branch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fakes::{FakeGit, FakeTracker, ScriptedPrompter, TestHarness};

    fn git(changes: Vec<String>) -> FakeGit {
        FakeGit {
            branches: vec![
                "s12/PROJ-9-fix_login".to_string(),
                "s11/PROJ-3-add_export".to_string(),
                "main".to_string(),
            ],
            changes,
            ..FakeGit::default()
        }
    }

    #[tokio::test]
    async fn checks_out_filtered_selection() {
        let prompter = ScriptedPrompter {
            selection: Some(0),
            ..ScriptedPrompter::default()
        };
        let harness = TestHarness::new(FakeTracker::default())
            .with_git(git(Vec::new()))
            .with_prompter(prompter);

        let chosen = switch_branch(&harness.context(), Some("PROJ-3"))
            .await
            .unwrap();
        assert_eq!(chosen.as_deref(), Some("s11/PROJ-3-add_export"));
        assert_eq!(harness.git.checked_out(), ["s11/PROJ-3-add_export"]);
    }

    #[tokio::test]
    async fn no_match_is_not_an_error() {
        let harness = TestHarness::new(FakeTracker::default()).with_git(git(Vec::new()));
        let chosen = switch_branch(&harness.context(), Some("nope"))
            .await
            .unwrap();

        assert_eq!(chosen, None);
        assert!(harness.prompter.questions().is_empty());
    }

    #[tokio::test]
    async fn refuses_checkout_with_pending_changes() {
        let harness = TestHarness::new(FakeTracker::default())
            .with_git(git(vec![" M Cargo.toml".to_string()]));
        let err = switch_branch(&harness.context(), None).await.unwrap_err();

        assert!(matches!(err, AppError::DirtyWorkingCopy(_)));
        assert!(harness.git.checked_out().is_empty());
    }
}
