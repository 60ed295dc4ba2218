use std::fmt;

use crate::domain::ticket::TicketReference;

const STRIPPED_CHARS: [char; 6] = ['[', ']', '(', ')', ',', '.'];

/// Conventional branch name: `s{sprint}/{ticket}-{slug}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
    pub sprint_number: String,
    pub ticket: TicketReference,
    pub slug: String,
}

impl BranchDescriptor {
    pub fn from_parts(sprint_number: &str, ticket: &TicketReference, free_text: &str) -> Self {
        Self {
            sprint_number: sprint_number.trim().to_string(),
            ticket: ticket.clone(),
            slug: slugify(free_text),
        }
    }
}

impl fmt::Display for BranchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}/{}-{}", self.sprint_number, self.ticket, self.slug)
    }
}

fn slugify(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}
