use std::future::Future;

use crate::context::AppContext;
use crate::domain::ticket::{TicketReference, parse_branch, parse_explicit};
use crate::error::AppResult;

/// Where a ticket came from: the branch it was parsed from, or the canonical
/// ticket string when it was given explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTicket {
    pub source: String,
    pub sprint: Option<String>,
    pub ticket: TicketReference,
}

/// Resolves the ticket an action applies to. The branch is only read when no
/// explicit token is given.
pub async fn resolve<F, Fut>(
    explicit: Option<&str>,
    current_branch: F,
    default_project_key: &str,
) -> AppResult<ResolvedTicket>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<String>>,
{
    let resolved = match explicit {
        Some(token) => {
            let ticket = parse_explicit(token, default_project_key)?;
            ResolvedTicket {
                source: ticket.to_string(),
                sprint: None,
                ticket,
            }
        }
        None => {
            let branch = current_branch().await?;
            let parsed = parse_branch(&branch)?;
            ResolvedTicket {
                source: branch,
                sprint: parsed.sprint,
                ticket: parsed.ticket,
            }
        }
    };

    tracing::debug!(
        source = %resolved.source,
        sprint = resolved.sprint.as_deref().unwrap_or("-"),
        project = resolved.ticket.project_key(),
        number = resolved.ticket.number(),
        "resolved ticket"
    );
    Ok(resolved)
}

pub async fn resolve_ticket(ctx: &AppContext, explicit: Option<&str>) -> AppResult<ResolvedTicket> {
    resolve(
        explicit,
        || ctx.version_control.current_branch(),
        ctx.config.default_project_key(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    async fn unreachable_branch() -> AppResult<String> {
        panic!("branch must not be read when a ticket is given")
    }

    #[tokio::test]
    async fn explicit_ticket_skips_branch_lookup() {
        let resolved = resolve(Some("X-123"), unreachable_branch, "PROJ")
            .await
            .unwrap();
        assert_eq!(resolved.ticket.to_string(), "PROJ-123");
        assert_eq!(resolved.source, "PROJ-123");
        assert_eq!(resolved.sprint, None);
    }

    #[tokio::test]
    async fn falls_back_to_current_branch() {
        let resolved = resolve(
            None,
            || async { Ok::<_, AppError>("s7/PROJ-42-fix_bug".to_string()) },
            "OTHER",
        )
        .await
        .unwrap();
        assert_eq!(resolved.source, "s7/PROJ-42-fix_bug");
        assert_eq!(resolved.sprint.as_deref(), Some("7"));
        assert_eq!(resolved.ticket.to_string(), "PROJ-42");
    }

    #[tokio::test]
    async fn branch_without_ticket_stops() {
        let err = resolve(
            None,
            || async { Ok::<_, AppError>("develop".to_string()) },
            "PROJ",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::UnresolvableBranch(_)));
    }

    #[tokio::test]
    async fn branch_read_failure_propagates() {
        let err = resolve(
            None,
            || async {
                Err::<String, _>(AppError::VersionControl {
                    command: "rev-parse --abbrev-ref HEAD".to_string(),
                    output: "not a git repository".to_string(),
                })
            },
            "PROJ",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::VersionControl { .. }));
    }
}
