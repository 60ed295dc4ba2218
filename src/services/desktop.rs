use crate::error::AppResult;

pub trait Desktop: Send + Sync {
    fn open_url(&self, url: &str) -> AppResult<()>;
    fn copy_text(&self, text: &str) -> AppResult<()>;
}
