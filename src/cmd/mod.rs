pub mod config;
pub mod git;
pub mod ticket;
