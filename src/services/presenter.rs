/// Structured output handed to the terminal; rendering is up to the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Status { label: String, value: String },
    Ticket {
        key: String,
        summary: String,
        status: Option<String>,
    },
    Heading(String),
    Body(String),
    Comment {
        updated: String,
        author: String,
        body: String,
    },
    Notice(String),
}

impl Line {
    pub fn status(label: &str, value: impl Into<String>) -> Self {
        Line::Status {
            label: label.to_string(),
            value: value.into(),
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Line::Notice(text.into())
    }
}

pub trait Presenter: Send + Sync {
    fn show(&self, line: Line);
}
