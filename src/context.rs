use std::sync::Arc;

use crate::config::StoredConfig;
use crate::domain::workflow::WorkflowGraph;
use crate::services::{Desktop, IssueTrackerService, Presenter, Prompter, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: StoredConfig,
    pub workflow: Arc<WorkflowGraph>,
    pub version_control: Arc<dyn VersionControlService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub presenter: Arc<dyn Presenter>,
    pub prompter: Arc<dyn Prompter>,
    pub desktop: Arc<dyn Desktop>,
}

impl AppContext {
    pub fn new(
        config: StoredConfig,
        workflow: Arc<WorkflowGraph>,
        version_control: Arc<dyn VersionControlService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        presenter: Arc<dyn Presenter>,
        prompter: Arc<dyn Prompter>,
        desktop: Arc<dyn Desktop>,
    ) -> Self {
        Self {
            config,
            workflow,
            version_control,
            issue_tracker,
            presenter,
            prompter,
            desktop,
        }
    }
}
