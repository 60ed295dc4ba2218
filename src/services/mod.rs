pub mod desktop;
pub mod issue_tracker;
pub mod presenter;
pub mod prompter;
pub mod version_control;

pub use desktop::Desktop;
pub use issue_tracker::IssueTrackerService;
pub use presenter::{Line, Presenter};
pub use prompter::Prompter;
pub use version_control::VersionControlService;
