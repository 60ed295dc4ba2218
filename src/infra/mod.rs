pub mod desktop;
pub mod git;
pub mod jira;
pub mod terminal;
