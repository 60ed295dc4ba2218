use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path, non_empty};
use crate::error::AppResult;
use crate::workflow::session::save_session;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
    /// Print the configuration file location.
    Path,
    /// Store a session value: a JSESSIONID cookie, a URL-encoded remember-me
    /// token, `b:<board id>`, `u:<user id>` or `github.main_branch=<branch>`.
    SaveSession { value: String },
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
        ConfigCommand::Path => {
            println!("{}", config_file_path()?.display());
            Ok(())
        }
        ConfigCommand::SaveSession { value } => run_save_session(&value),
    }
}

fn run_save_session(value: &str) -> AppResult<()> {
    let path = config_file_path()?;
    let field = save_session(&path, value)?;
    println!("update {} [done]", field.label());
    Ok(())
}

fn run_init() -> AppResult<()> {
    let path = config_file_path()?;
    let mut cfg = StoredConfig::load_from(&path)?;

    println!("Configuring jarc.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt(
        "Jira host (e.g., jira.company.com)",
        &mut cfg.jira.host,
        false,
    )?;
    apply_prompt("Default Jira project key", &mut cfg.jira.project_key, false)?;
    apply_prompt("Jira board id", &mut cfg.jira.board_id, false)?;
    apply_prompt("Jira user id", &mut cfg.jira.user_id, false)?;
    apply_prompt("Jira email (API token auth)", &mut cfg.jira.email, false)?;
    apply_prompt("Jira API token", &mut cfg.jira.token, true)?;

    apply_prompt("GitHub host", &mut cfg.github.host, false)?;
    apply_prompt(
        "GitHub repository (owner/name)",
        &mut cfg.github.repo,
        false,
    )?;
    apply_prompt(
        "Base branch for pull requests",
        &mut cfg.github.main_branch,
        false,
    )?;
    apply_prompt("Git remote to push to", &mut cfg.github.remote, false)?;

    cfg.save_to(&path)?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let path = config_file_path()?;
    let cfg = StoredConfig::load_from(&path)?;

    println!("Configuration file: {}", path.display());
    println!("Jira host: {}", display_value(&cfg.jira.host));
    println!("Jira session: {}", mask_secret(&cfg.jira.session));
    println!("Jira remember-me: {}", mask_secret(&cfg.jira.remember_me));
    println!("Project key: {}", display_value(&cfg.jira.project_key));
    println!("Board id: {}", display_value(&cfg.jira.board_id));
    println!("User id: {}", display_value(&cfg.jira.user_id));
    println!("Jira email: {}", display_value(&cfg.jira.email));
    println!("Jira API token: {}", mask_secret(&cfg.jira.token));
    println!("Ready statuses: {}", cfg.ready_statuses().join(", "));
    println!("GitHub host: {}", display_value(&cfg.github.host));
    println!("GitHub repo: {}", display_value(&cfg.github.repo));
    println!("Base branch: {}", display_value(&cfg.github.main_branch));
    println!("Remote: {}", display_value(&cfg.github.remote));

    Ok(())
}

fn apply_prompt(field: &str, target: &mut String, secret: bool) -> AppResult<()> {
    match prompt(field, non_empty(target), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => target.clear(),
        PromptAction::Set(value) => *target = value,
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(parse_prompt_input(&input))
}

fn parse_prompt_input(input: &str) -> PromptAction {
    match input.trim() {
        "" => PromptAction::Keep,
        "-" => PromptAction::Clear,
        value => PromptAction::Set(value.to_string()),
    }
}

fn display_value(value: &str) -> String {
    non_empty(value)
        .map(str::to_string)
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &str) -> String {
    match value.trim() {
        token if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        "" => "<not set>".to_string(),
        _ => "***".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_secret("AAAABBBBCC"), "AAA***BCC");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(" "), "<not set>");
    }

    #[test]
    fn parses_prompt_answers() {
        assert_eq!(parse_prompt_input("\n"), PromptAction::Keep);
        assert_eq!(parse_prompt_input(" - \n"), PromptAction::Clear);
        assert_eq!(
            parse_prompt_input("PROJ\n"),
            PromptAction::Set("PROJ".to_string())
        );
    }
}
