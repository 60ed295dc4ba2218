use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::StoredConfig;
use crate::context::AppContext;
use crate::domain::issue::{Issue, Sprint};
use crate::domain::workflow::WorkflowGraph;
use crate::error::{AppError, AppResult};
use crate::services::{
    Desktop, IssueTrackerService, Line, Presenter, Prompter, VersionControlService,
};

pub fn issue(key: &str, status: &str) -> Issue {
    Issue {
        id: format!("id-{key}"),
        key: key.to_string(),
        summary: format!("Summary of {key}"),
        status: status.to_string(),
        description: None,
        points: None,
        epic: None,
        assignee: None,
        pull_request_state: None,
        comments: Vec::new(),
    }
}

pub fn sprint(id: u64, name: &str) -> Sprint {
    Sprint {
        id,
        name: name.to_string(),
        state: "active".to_string(),
    }
}

pub fn config() -> StoredConfig {
    let mut config = StoredConfig::default();
    config.jira.host = "jira.example.com".to_string();
    config.jira.project_key = "PROJ".to_string();
    config.jira.board_id = "7192".to_string();
    config.jira.user_id = "jdoe".to_string();
    config.github.repo = "acme/web".to_string();
    config
}

#[derive(Default)]
pub struct FakeTracker {
    pub issues: HashMap<String, Issue>,
    /// `(needle, results)`: the first whose needle appears in the JQL answers it.
    pub search_results: Vec<(String, Vec<Issue>)>,
    pub sprints: Vec<Sprint>,
    pub queries: Mutex<Vec<String>>,
    pub transitions: Mutex<Vec<(String, String)>>,
}

impl FakeTracker {
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.key.clone(), issue);
        self
    }

    pub fn with_search(mut self, needle: &str, issues: Vec<Issue>) -> Self {
        self.search_results.push((needle.to_string(), issues));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn transitions(&self) -> Vec<(String, String)> {
        self.transitions.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
    async fn get_issue(&self, key: &str) -> AppResult<Issue> {
        match self.issues.get(key) {
            Some(issue) => Ok(issue.clone()),
            None => Err(AppError::Tracker {
                status: 404,
                body: format!("Issue {key} does not exist"),
            }),
        }
    }

    async fn search_issues(&self, jql: &str) -> AppResult<Vec<Issue>> {
        self.queries.lock().unwrap().push(jql.to_string());
        Ok(self
            .search_results
            .iter()
            .find(|(needle, _)| jql.contains(needle.as_str()))
            .map(|(_, issues)| issues.clone())
            .unwrap_or_default())
    }

    async fn post_transition(&self, issue_id: &str, transition_id: &str) -> AppResult<()> {
        self.transitions
            .lock()
            .unwrap()
            .push((issue_id.to_string(), transition_id.to_string()));
        Ok(())
    }

    async fn active_sprints(&self, _board_id: &str) -> AppResult<Vec<Sprint>> {
        Ok(self.sprints.clone())
    }
}

pub struct FakeGit {
    pub branch: String,
    pub changes: Vec<String>,
    pub branches: Vec<String>,
    pub created: Mutex<Vec<String>>,
    pub checked_out: Mutex<Vec<String>>,
    pub pushed: Mutex<Vec<(String, String)>>,
}

impl Default for FakeGit {
    fn default() -> Self {
        Self {
            branch: "main".to_string(),
            changes: Vec::new(),
            branches: Vec::new(),
            created: Mutex::new(Vec::new()),
            checked_out: Mutex::new(Vec::new()),
            pushed: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGit {
    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn checked_out(&self) -> Vec<String> {
        self.checked_out.lock().unwrap().clone()
    }
}

#[async_trait]
impl VersionControlService for FakeGit {
    async fn current_branch(&self) -> AppResult<String> {
        Ok(self.branch.clone())
    }

    async fn working_copy_changes(&self) -> AppResult<Vec<String>> {
        Ok(self.changes.clone())
    }

    async fn checkout(&self, branch: &str) -> AppResult<()> {
        self.checked_out.lock().unwrap().push(branch.to_string());
        Ok(())
    }

    async fn create_branch(&self, branch: &str) -> AppResult<()> {
        self.created.lock().unwrap().push(branch.to_string());
        Ok(())
    }

    async fn list_branches(&self) -> AppResult<Vec<String>> {
        Ok(self.branches.clone())
    }

    async fn push_upstream(&self, remote: &str, branch: &str) -> AppResult<String> {
        self.pushed
            .lock()
            .unwrap()
            .push((remote.to_string(), branch.to_string()));
        Ok(format!("branch '{branch}' set up to track '{remote}/{branch}'."))
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub lines: Mutex<Vec<Line>>,
}

impl RecordingPresenter {
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn show(&self, line: Line) {
        self.lines.lock().unwrap().push(line);
    }
}

/// Answers confirmations from a script, falling back to each question's
/// default once the script runs out.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: Mutex<VecDeque<bool>>,
    pub selection: Option<usize>,
    pub questions: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            selection: Some(0),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, default: bool) -> AppResult<bool> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(default))
    }

    fn select(&self, question: &str, _items: &[String]) -> AppResult<Option<usize>> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.selection)
    }
}

#[derive(Default)]
pub struct FakeDesktop {
    pub opened: Mutex<Vec<String>>,
    pub copied: Mutex<Vec<String>>,
}

impl Desktop for FakeDesktop {
    fn open_url(&self, url: &str) -> AppResult<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn copy_text(&self, text: &str) -> AppResult<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct TestHarness {
    pub config: StoredConfig,
    pub git: Arc<FakeGit>,
    pub tracker: Arc<FakeTracker>,
    pub presenter: Arc<RecordingPresenter>,
    pub prompter: Arc<ScriptedPrompter>,
    pub desktop: Arc<FakeDesktop>,
}

impl TestHarness {
    pub fn new(tracker: FakeTracker) -> Self {
        Self {
            config: config(),
            git: Arc::new(FakeGit::default()),
            tracker: Arc::new(tracker),
            presenter: Arc::new(RecordingPresenter::default()),
            prompter: Arc::new(ScriptedPrompter::answering(&[])),
            desktop: Arc::new(FakeDesktop::default()),
        }
    }

    pub fn with_git(mut self, git: FakeGit) -> Self {
        self.git = Arc::new(git);
        self
    }

    pub fn with_prompter(mut self, prompter: ScriptedPrompter) -> Self {
        self.prompter = Arc::new(prompter);
        self
    }

    pub fn context(&self) -> AppContext {
        AppContext::new(
            self.config.clone(),
            Arc::new(WorkflowGraph::standard()),
            self.git.clone(),
            self.tracker.clone(),
            self.presenter.clone(),
            self.prompter.clone(),
            self.desktop.clone(),
        )
    }
}
