use crate::error::AppResult;

pub trait Prompter: Send + Sync {
    /// Yes/no question; empty input answers `default`.
    fn confirm(&self, question: &str, default: bool) -> AppResult<bool>;
    /// Pick one of `items`; `None` when the user backs out.
    fn select(&self, question: &str, items: &[String]) -> AppResult<Option<usize>>;
}
