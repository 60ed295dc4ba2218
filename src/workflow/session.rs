use std::path::Path;

use crate::config::StoredConfig;
use crate::domain::session::{SessionField, classify};
use crate::error::AppResult;

/// Classifies `raw`, stores it in the matching field of the config at `path`
/// and returns what was updated.
pub fn save_session(path: &Path, raw: &str) -> AppResult<SessionField> {
    let mut config = StoredConfig::load_from(path)?;
    let field = classify(raw.trim());
    field.clone().apply(&mut config);
    config.save_to(path)?;
    tracing::debug!(field = field.label(), "session value saved");
    Ok(field)
}
