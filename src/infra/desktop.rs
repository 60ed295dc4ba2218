use arboard::Clipboard;

use crate::error::{AppError, AppResult};
use crate::services::Desktop;

pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn open_url(&self, url: &str) -> AppResult<()> {
        tracing::debug!(url, "opening in browser");
        open::that(url).map_err(|err| {
            AppError::Desktop(format!("could not open {url} in a browser: {err}"))
        })
    }

    fn copy_text(&self, text: &str) -> AppResult<()> {
        let mut clipboard = Clipboard::new()
            .map_err(|err| AppError::Desktop(format!("clipboard unavailable: {err}")))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| AppError::Desktop(format!("failed to copy to clipboard: {err}")))
    }
}
