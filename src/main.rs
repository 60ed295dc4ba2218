mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::git::{self as git_cmd, BranchArgs};
use crate::cmd::ticket::{self, OpenArgs, SearchArgs};
use crate::config::StoredConfig;
use crate::context::AppContext;
use crate::domain::workflow::WorkflowGraph;
use crate::error::{AppError, AppResult};
use crate::infra::desktop::SystemDesktop;
use crate::infra::git::GitCli;
use crate::infra::jira::JiraClient;
use crate::infra::terminal::{TerminalPresenter, TerminalPrompter};

#[derive(Parser)]
#[command(
    name = "jarc",
    author,
    version,
    about = "Jira and GitHub helper for the branch you are on"
)]
struct Cli {
    /// Show diagnostic output.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Ticket to act on instead of the one in the branch name (`PROJ-123`, `p-123`, `123`).
    #[arg(short = 'j', long, global = true)]
    ticket: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Ticket(TicketCommand),
    /// Manage CLI configuration and saved sessions.
    Config(ConfigArgs),
}

/// Commands that act on the repository and the tracker.
#[derive(Subcommand)]
enum TicketCommand {
    /// Pick an assigned ticket, create its branch and move it in progress.
    Start,
    /// Print the pull request link and title, and move the ticket to review.
    Pr,
    /// Push the current branch and set its upstream.
    Push,
    /// Show the ticket description and comments.
    Desc,
    /// Open the ticket, its board or the pull request page in a browser.
    Open(OpenArgs),
    /// List branches and check one out.
    Branch(BranchArgs),
    /// Search tickets by text.
    Search(SearchArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Interactive prompts block the main task, so interrupts are watched
    // from a separate worker.
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            std::process::exit(0);
        }
    });

    match run(cli).await {
        Ok(()) => {}
        Err(AppError::Cancelled) => println!(),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Ticket(command) => run_ticket(command, cli.ticket.as_deref()).await,
    }
}

async fn run_ticket(command: TicketCommand, ticket: Option<&str>) -> AppResult<()> {
    let context = build_context()?;

    match command {
        TicketCommand::Start => ticket::run_start(&context, ticket).await,
        TicketCommand::Pr => git_cmd::run_pull_request(&context, ticket).await,
        TicketCommand::Push => git_cmd::run_push(&context).await,
        TicketCommand::Desc => ticket::run_describe(&context, ticket).await,
        TicketCommand::Open(args) => ticket::run_open(&context, args, ticket).await,
        TicketCommand::Branch(args) => git_cmd::run_branch(&context, args).await,
        TicketCommand::Search(args) => ticket::run_search(&context, args).await,
    }
}

fn build_context() -> AppResult<AppContext> {
    let cwd = std::env::current_dir()?;
    let config = StoredConfig::load()?;
    tracing::debug!(jira = %config.jira.host, repo = %config.github.repo, "config loaded");

    let issue_tracker = Arc::new(JiraClient::new(&config)?);
    let git = Arc::new(GitCli::new(cwd));

    Ok(AppContext::new(
        config,
        Arc::new(WorkflowGraph::standard()),
        git,
        issue_tracker,
        Arc::new(TerminalPresenter),
        Arc::new(TerminalPrompter),
        Arc::new(SystemDesktop),
    ))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::cmd::config::ConfigCommand;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ticket_flag_is_global() {
        let cli = Cli::try_parse_from(["jarc", "start", "-j", "p-7"]).unwrap();
        assert!(matches!(cli.command, Commands::Ticket(TicketCommand::Start)));
        assert_eq!(cli.ticket.as_deref(), Some("p-7"));
    }

    #[test]
    fn config_commands_parse_separately() {
        let cli = Cli::try_parse_from(["jarc", "config", "save-session", "b:7192"]).unwrap();
        let Commands::Config(args) = cli.command else {
            panic!("expected the config command");
        };
        assert!(matches!(args.command, ConfigCommand::SaveSession { value } if value == "b:7192"));
    }
}
