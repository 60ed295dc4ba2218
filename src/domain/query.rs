use crate::domain::issue::Sprint;

pub const DEFAULT_READY_STATUSES: [&str; 2] = ["To Develop", FALLBACK_READY_STATUS];

/// Always searched last before giving up on assigned work.
pub const FALLBACK_READY_STATUS: &str = "To Do";

/// One JQL search issued while looking for the user's next ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAttempt {
    pub status: String,
    pub jql: String,
}

/// Builds the searches for assigned work in `sprint`, one per ready status,
/// in the order they should be tried.
pub fn plan_active_work(sprint: &Sprint, user_id: &str, statuses: &[String]) -> Vec<QueryAttempt> {
    statuses
        .iter()
        .map(|status| QueryAttempt {
            status: status.clone(),
            jql: format!(
                "status = \"{}\" AND resolution = Unresolved AND assignee = \"{}\" \
                 AND sprint = {} ORDER BY priority DESC, updated DESC",
                escape_literal(status),
                escape_literal(user_id),
                sprint.id
            ),
        })
        .collect()
}

/// Free-text ticket search, optionally restricted to one project.
pub fn text_search(text: &str, project_key: Option<&str>) -> String {
    let mut clauses = vec![format!("text ~ \"{}\"", escape_literal(text.trim()))];
    if let Some(project) = project_key {
        clauses.push(format!("project = \"{}\"", escape_literal(project)));
    }
    format!("{} ORDER BY updated DESC", clauses.join(" AND "))
}

/// Escapes a value for use inside a double-quoted JQL string literal.
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}
