use crate::config::StoredConfig;

const MAIN_BRANCH_KEY: &str = "github.main_branch=";

/// Config field a single `save-session` value updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionField {
    SessionCookie(String),
    RememberMeToken(String),
    BoardId(String),
    UserId(String),
    MainBranchOverride(String),
}

type Rule = (fn(&str) -> bool, fn(&str) -> SessionField);

// Evaluated top to bottom; prefixes overlap so the order is significant.
const RULES: [Rule; 4] = [
    (
        |raw| raw.contains(MAIN_BRANCH_KEY),
        |raw| {
            let value = raw
                .split_once(MAIN_BRANCH_KEY)
                .map_or("", |(_, value)| value);
            SessionField::MainBranchOverride(value.to_string())
        },
    ),
    (
        |raw| raw.starts_with("b:"),
        |raw| SessionField::BoardId(raw[2..].to_string()),
    ),
    (
        |raw| raw.starts_with("u:"),
        |raw| SessionField::UserId(raw[2..].to_string()),
    ),
    // Remember-me tokens are stored URL-encoded.
    (
        |raw| raw.contains("%3A") || raw.contains("%3a"),
        |raw| SessionField::RememberMeToken(raw.to_string()),
    ),
];

pub fn classify(raw: &str) -> SessionField {
    RULES
        .iter()
        .find(|(matches, _)| matches(raw))
        .map(|(_, build)| build(raw))
        .unwrap_or_else(|| SessionField::SessionCookie(raw.to_string()))
}

impl SessionField {
    pub fn label(&self) -> &'static str {
        match self {
            SessionField::SessionCookie(_) => "jira.session",
            SessionField::RememberMeToken(_) => "jira.remember_me",
            SessionField::BoardId(_) => "jira.board_id",
            SessionField::UserId(_) => "jira.user_id",
            SessionField::MainBranchOverride(_) => "github.main_branch",
        }
    }

    pub fn apply(self, config: &mut StoredConfig) {
        match self {
            SessionField::SessionCookie(value) => config.jira.session = value,
            SessionField::RememberMeToken(value) => config.jira.remember_me = value,
            SessionField::BoardId(value) => config.jira.board_id = value,
            SessionField::UserId(value) => config.jira.user_id = value,
            SessionField::MainBranchOverride(value) => config.github.main_branch = value,
        }
    }
}
