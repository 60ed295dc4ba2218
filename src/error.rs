use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("'{0}' is not a ticket reference: no ticket number found")]
    MalformedReference(String),
    #[error("could not get ticket details from branch '{0}'")]
    UnresolvableBranch(String),
    #[error("no active sprint found for board {0}")]
    NoActiveSprint(String),
    #[error("no tickets assigned to you in the active sprint (tried: {})", .tried.join(", "))]
    NoAssignedWork { tried: Vec<String> },
    #[error("uncommitted changes, commit or stash them first:\n{}", .0.join("\n"))]
    DirtyWorkingCopy(Vec<String>),
    #[error("git {command} failed: {output}")]
    VersionControl { command: String, output: String },
    #[error("tracker responded with {status}: {body}")]
    Tracker { status: u16, body: String },
    #[error("issue tracker error: {0}")]
    TrackerRequest(String),
    #[error("desktop integration error: {0}")]
    Desktop(String),
    #[error("cancelled")]
    Cancelled,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type AppResult<T> = Result<T, AppError>;
