#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub status: String,
    pub description: Option<String>,
    pub points: Option<f64>,
    pub epic: Option<String>,
    pub assignee: Option<String>,
    pub pull_request_state: Option<String>,
    pub comments: Vec<Comment>,
}

impl Issue {
    /// Story points as shown in titles: whole numbers without a fraction, `0` when unset.
    pub fn points_label(&self) -> String {
        match self.points {
            Some(points) if points.fract() == 0.0 => format!("{points:.0}"),
            Some(points) => points.to_string(),
            None => "0".to_string(),
        }
    }

    /// Title used for the pull request raised from this ticket.
    pub fn pull_request_title(&self) -> String {
        format!("[#{}] - ({}) {}", self.key, self.points_label(), self.summary)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: String,
}

impl Sprint {
    /// Number used in branch prefixes: the last digit run of the sprint name,
    /// or the sprint id when the name carries none.
    pub fn number(&self) -> String {
        self.name
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}
