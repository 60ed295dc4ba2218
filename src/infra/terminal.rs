use std::io;

use dialoguer::{Confirm, Select};

use crate::error::{AppError, AppResult};
use crate::services::{Line, Presenter, Prompter};

pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show(&self, line: Line) {
        match line {
            Line::Status { label, value } => println!("{label}: [{value}]"),
            Line::Ticket {
                key,
                summary,
                status: Some(status),
            } => println!("{key} [{status}] {summary}"),
            Line::Ticket {
                key,
                summary,
                status: None,
            } => println!("{key} {summary}"),
            Line::Heading(text) => println!("\n# {text}"),
            Line::Body(text) => println!("{text}"),
            Line::Comment {
                updated,
                author,
                body,
            } => println!("\n{updated} {author}: {body}"),
            Line::Notice(text) => eprintln!("{text}"),
        }
    }
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str, default: bool) -> AppResult<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn select(&self, question: &str, items: &[String]) -> AppResult<Option<usize>> {
        Select::new()
            .with_prompt(question)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)
    }
}

fn prompt_error(err: dialoguer::Error) -> AppError {
    let dialoguer::Error::IO(err) = err;
    if err.kind() == io::ErrorKind::Interrupted {
        AppError::Cancelled
    } else {
        AppError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_prompt_is_cancelled() {
        let interrupted = dialoguer::Error::IO(io::ErrorKind::Interrupted.into());
        assert!(matches!(prompt_error(interrupted), AppError::Cancelled));

        let detached = dialoguer::Error::IO(io::ErrorKind::NotConnected.into());
        assert!(matches!(
            prompt_error(detached),
            AppError::Io(err) if err.kind() == io::ErrorKind::NotConnected
        ));
    }
}
