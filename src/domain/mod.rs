pub mod branch;
pub mod issue;
pub mod query;
pub mod session;
pub mod ticket;
pub mod workflow;
