#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowStatus {
    pub id: &'static str,
    pub name: &'static str,
    pub next: Option<&'static str>,
}

pub const BACKLOG: &str = "11";
pub const TO_DEVELOP: &str = "61";
pub const IN_PROGRESS: &str = "21";
pub const IN_REVIEW: &str = "31";
pub const IN_TEST: &str = "51";
pub const DONE: &str = "41";

const STATUSES: [WorkflowStatus; 6] = [
    WorkflowStatus {
        id: BACKLOG,
        name: "Backlog",
        next: Some(TO_DEVELOP),
    },
    WorkflowStatus {
        id: TO_DEVELOP,
        name: "To Develop",
        next: Some(IN_PROGRESS),
    },
    WorkflowStatus {
        id: IN_PROGRESS,
        name: "In Progress",
        next: Some(IN_REVIEW),
    },
    WorkflowStatus {
        id: IN_REVIEW,
        name: "In Review",
        next: Some(IN_TEST),
    },
    WorkflowStatus {
        id: IN_TEST,
        name: "In Test",
        next: Some(DONE),
    },
    WorkflowStatus {
        id: DONE,
        name: "Done",
        next: None,
    },
];

/// CLI actions that may nudge a ticket forward once the git side succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    /// A branch was created for the ticket.
    StartWork,
    /// A pull request is being raised for the ticket's branch.
    AdvanceOnPullRequest,
}

/// Transition request: the target status, whose id doubles as the tracker's
/// transition id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub id: &'static str,
    pub target: &'static str,
}

#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    statuses: Vec<WorkflowStatus>,
}

impl WorkflowGraph {
    pub fn standard() -> Self {
        Self {
            statuses: STATUSES.to_vec(),
        }
    }

    pub fn status(&self, id: &str) -> Option<&WorkflowStatus> {
        self.statuses.iter().find(|status| status.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&WorkflowStatus> {
        let name = name.trim();
        self.statuses
            .iter()
            .find(|status| status.name.eq_ignore_ascii_case(name))
    }

    pub fn next_of(&self, status: &WorkflowStatus) -> Option<&WorkflowStatus> {
        status.next.and_then(|id| self.status(id))
    }

    /// Returns the transition `action` should request for a ticket currently
    /// in `current_status`, or `None` when no automatic nudge applies.
    ///
    /// This only states intent; callers confirm with the user before posting it.
    pub fn transition_for(
        &self,
        action: WorkflowAction,
        current_status: &str,
    ) -> Option<Transition> {
        let target = match action {
            WorkflowAction::StartWork => IN_PROGRESS,
            WorkflowAction::AdvanceOnPullRequest => {
                let current = self.by_name(current_status)?;
                if current.id != TO_DEVELOP && current.id != IN_PROGRESS {
                    return None;
                }
                IN_REVIEW
            }
        };
        self.status(target).map(|status| Transition {
            id: status.id,
            target: status.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_is_a_single_chain_ending_in_done() {
        let graph = WorkflowGraph::standard();
        let mut current = graph.status(BACKLOG).unwrap();
        let mut visited = vec![current.name];
        while let Some(next) = graph.next_of(current) {
            visited.push(next.name);
            current = next;
        }
        assert_eq!(
            visited,
            [
                "Backlog",
                "To Develop",
                "In Progress",
                "In Review",
                "In Test",
                "Done",
            ]
        );
    }

    #[test]
    fn pull_request_moves_active_tickets_to_review() {
        let graph = WorkflowGraph::standard();
        for status in ["In Progress", "To Develop", " in progress "] {
            let transition = graph
                .transition_for(WorkflowAction::AdvanceOnPullRequest, status)
                .unwrap();
            assert_eq!(transition.id, "31");
            assert_eq!(transition.target, "In Review");
        }
    }

    #[test]
    fn pull_request_leaves_other_statuses_alone() {
        let graph = WorkflowGraph::standard();
        for status in ["Done", "In Review", "In Test", "Backlog", "Won't Fix"] {
            assert_eq!(
                graph.transition_for(WorkflowAction::AdvanceOnPullRequest, status),
                None
            );
        }
    }

    #[test]
    fn starting_work_always_targets_in_progress() {
        let graph = WorkflowGraph::standard();
        for status in ["Backlog", "To Do", "Done"] {
            let transition = graph
                .transition_for(WorkflowAction::StartWork, status)
                .unwrap();
            assert_eq!(transition.id, IN_PROGRESS);
        }
    }
}
