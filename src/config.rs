use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::query::{DEFAULT_READY_STATUSES, FALLBACK_READY_STATUS};
use crate::error::{AppError, AppResult};

const CONFIG_FILE_NAME: &str = ".jarc.yml";
const CONFIG_PATH_ENV: &str = "JARC_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub host: String,
    pub session: String,
    pub remember_me: String,
    pub project_key: String,
    pub board_id: String,
    pub user_id: String,
    pub email: String,
    pub token: String,
    pub verify_tls: bool,
    pub ready_statuses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub host: String,
    pub main_branch: String,
    pub repo: String,
    pub remote: String,
}

fn default_version() -> String {
    "1".to_string()
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            jira: JiraConfig::default(),
            github: GithubConfig::default(),
        }
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            host: "api.atlassian.com".to_string(),
            session: String::new(),
            remember_me: String::new(),
            project_key: String::new(),
            board_id: String::new(),
            user_id: String::new(),
            email: String::new(),
            token: String::new(),
            verify_tls: true,
            ready_statuses: DEFAULT_READY_STATUSES.map(String::from).to_vec(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            main_branch: "main".to_string(),
            repo: String::new(),
            remote: "origin".to_string(),
        }
    }
}

/// Treats blank config values as unset.
pub fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

pub fn config_file_path() -> AppResult<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let home = dirs::home_dir().ok_or_else(|| {
        AppError::Configuration("could not determine the home directory".to_string())
    })?;
    Ok(home.join(CONFIG_FILE_NAME))
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Self::default()),
            Ok(contents) => Ok(serde_yaml::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Tracker base URL; a bare host means https.
    pub fn jira_base_url(&self) -> String {
        let host = self.jira.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }

    pub fn default_project_key(&self) -> &str {
        self.jira.project_key.trim()
    }

    pub fn board_id(&self) -> AppResult<&str> {
        non_empty(&self.jira.board_id).ok_or_else(|| {
            AppError::Configuration(
                "jira.board_id is not configured (save it with `config save-session b:<id>`)"
                    .to_string(),
            )
        })
    }

    pub fn user_id(&self) -> AppResult<&str> {
        non_empty(&self.jira.user_id).ok_or_else(|| {
            AppError::Configuration(
                "jira.user_id is not configured (save it with `config save-session u:<id>`)"
                    .to_string(),
            )
        })
    }

    pub fn github_repo(&self) -> AppResult<&str> {
        non_empty(&self.github.repo)
            .ok_or_else(|| AppError::Configuration("github.repo is not configured".to_string()))
    }

    /// Owner half of `owner/name`, used as the head side of compare links.
    pub fn github_owner(&self) -> AppResult<&str> {
        let repo = self.github_repo()?;
        repo.split('/')
            .next()
            .and_then(non_empty)
            .ok_or_else(|| AppError::Configuration(format!("github.repo '{repo}' has no owner")))
    }

    /// Configured ready statuses in search order, ending with the `To Do`
    /// fallback even when the config leaves it out.
    pub fn ready_statuses(&self) -> Vec<String> {
        let mut statuses: Vec<String> = self
            .jira
            .ready_statuses
            .iter()
            .filter_map(|status| non_empty(status))
            .map(str::to_string)
            .collect();
        if statuses.is_empty() {
            return DEFAULT_READY_STATUSES.map(String::from).to_vec();
        }
        if !statuses
            .iter()
            .any(|status| status.eq_ignore_ascii_case(FALLBACK_READY_STATUS))
        {
            statuses.push(FALLBACK_READY_STATUS.to_string());
        }
        statuses
    }
}
