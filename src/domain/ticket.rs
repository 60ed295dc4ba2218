use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AppError, AppResult};

/// Canonical `PROJECT-123` identifier of a tracked work item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketReference {
    project_key: String,
    number: String,
}

impl TicketReference {
    pub fn new(project_key: &str, number: &str) -> AppResult<Self> {
        let project_key = project_key.trim().to_ascii_uppercase();
        let number = number.trim();
        if project_key.is_empty() || !project_key.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::Configuration(format!(
                "'{project_key}' is not a valid project key"
            )));
        }
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::MalformedReference(format!("{project_key}-{number}")));
        }
        Ok(Self {
            project_key,
            number: number.to_string(),
        })
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for TicketReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project_key, self.number)
    }
}

/// Ticket extracted from a branch name, with the sprint prefix when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTicket {
    pub sprint: Option<String>,
    pub ticket: TicketReference,
}

static EXPLICIT_RE: OnceLock<Regex> = OnceLock::new();
static BRANCH_RE: OnceLock<Regex> = OnceLock::new();

fn explicit_re() -> &'static Regex {
    EXPLICIT_RE.get_or_init(|| Regex::new(r"([a-zA-Z]+)?-?([0-9]+)").unwrap())
}

fn branch_re() -> &'static Regex {
    BRANCH_RE.get_or_init(|| Regex::new(r"(s([0-9]+)/)?([A-Z]+)-([0-9]+)(-\w+)?").unwrap())
}

/// Parses a ticket token typed by the user.
///
/// A single-letter prefix (`p-12`) is too short to be a project key and, like
/// a bare number, falls back to `default_project_key`.
pub fn parse_explicit(token: &str, default_project_key: &str) -> AppResult<TicketReference> {
    let captures = explicit_re()
        .captures(token)
        .ok_or_else(|| AppError::MalformedReference(token.to_string()))?;
    let number = &captures[2];

    let project_key = match captures.get(1).map(|m| m.as_str()) {
        Some(prefix) if prefix.len() > 1 => prefix,
        _ => default_project_key,
    };
    if project_key.trim().is_empty() {
        return Err(AppError::Configuration(format!(
            "'{token}' has no project key and jira.project_key is not configured"
        )));
    }

    TicketReference::new(project_key, number)
}

/// Extracts the ticket from a conventional `sN/PROJ-123-description` branch.
pub fn parse_branch(branch: &str) -> AppResult<BranchTicket> {
    let captures = branch_re()
        .captures(branch)
        .ok_or_else(|| AppError::UnresolvableBranch(branch.to_string()))?;

    let ticket = TicketReference::new(&captures[3], &captures[4])?;
    Ok(BranchTicket {
        sprint: captures.get(2).map(|m| m.as_str().to_string()),
        ticket,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letter_prefix_uses_default_project() {
        for token in ["X-123", "p-123", "x123"] {
            let ticket = parse_explicit(token, "PROJ").unwrap();
            assert_eq!(ticket.to_string(), "PROJ-123");
        }
    }

    #[test]
    fn bare_number_uses_default_project() {
        assert_eq!(parse_explicit("77", "CORE").unwrap().to_string(), "CORE-77");
    }

    #[test]
    fn multi_letter_prefix_is_kept() {
        for token in ["ABC-456", "abc456"] {
            let ticket = parse_explicit(token, "PROJ").unwrap();
            assert_eq!(ticket.to_string(), "ABC-456");
        }
    }

    #[test]
    fn explicit_token_without_digits_is_malformed() {
        let err = parse_explicit("PROJ-", "PROJ").unwrap_err();
        assert!(matches!(err, AppError::MalformedReference(token) if token == "PROJ-"));
    }

    #[test]
    fn missing_default_project_is_a_configuration_error() {
        let err = parse_explicit("12", "").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn parses_sprint_branch() {
        let parsed = parse_branch("s7/PROJ-42-fix_bug").unwrap();
        assert_eq!(parsed.sprint.as_deref(), Some("7"));
        assert_eq!(parsed.ticket.to_string(), "PROJ-42");
    }

    #[test]
    fn parses_branch_without_sprint_or_description() {
        let parsed = parse_branch("PROJ-42").unwrap();
        assert_eq!(parsed.sprint, None);
        assert_eq!(parsed.ticket.project_key(), "PROJ");
        assert_eq!(parsed.ticket.number(), "42");
    }

    #[test]
    fn branch_without_ticket_is_unresolvable() {
        let err = parse_branch("main").unwrap_err();
        assert!(matches!(err, AppError::UnresolvableBranch(branch) if branch == "main"));
    }
}
