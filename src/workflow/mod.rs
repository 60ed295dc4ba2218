pub mod branch;
pub mod planner;
pub mod pull_request;
pub mod resolve;
pub mod session;
pub mod ticket;
pub mod transition;

#[cfg(test)]
pub(crate) mod fakes;
