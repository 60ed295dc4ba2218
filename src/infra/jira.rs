use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use chrono::DateTime;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{StoredConfig, non_empty};
use crate::domain::issue::{Comment, Issue, Sprint};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const SESSION_COOKIE: &str = "JSESSIONID";
const REMEMBER_ME_COOKIE: &str = "seraph.rememberme.cookie";
const CLIENT_USER_AGENT: &str = "curl/7.8.12";
const POINTS_FIELD: &str = "customfield_10006";
const EPIC_FIELD: &str = "customfield_10003";
const DEVELOPMENT_FIELD: &str = "customfield_11100";
const SEARCH_LIMIT: u32 = 50;

enum Credentials {
    Session {
        session: String,
        remember_me: Option<String>,
    },
    ApiToken {
        email: String,
        token: String,
    },
    Anonymous,
}

pub struct JiraClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl JiraClient {
    pub fn new(config: &StoredConfig) -> AppResult<Self> {
        let base_url = config.jira_base_url();
        let config = &config.jira;
        let http = Client::builder()
            .no_proxy()
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        let credentials = match (
            non_empty(&config.session),
            non_empty(&config.email),
            non_empty(&config.token),
        ) {
            (Some(session), _, _) => Credentials::Session {
                session: session.to_string(),
                remember_me: non_empty(&config.remember_me).map(str::to_string),
            },
            (None, Some(email), Some(token)) => Credentials::ApiToken {
                email: email.to_string(),
                token: token.to_string(),
            },
            _ => {
                tracing::warn!(
                    "no Jira session or API token configured; requests will be anonymous"
                );
                Credentials::Anonymous
            }
        };

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn cookie_header(session: &str, remember_me: Option<&str>) -> String {
        let mut cookie = format!("{SESSION_COOKIE}={session}");
        if let Some(token) = remember_me {
            cookie.push_str(&format!("; {REMEMBER_ME_COOKIE}={token}"));
        }
        cookie
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, "application/json");
        match &self.credentials {
            Credentials::Session {
                session,
                remember_me,
            } => request.header(COOKIE, Self::cookie_header(session, remember_me.as_deref())),
            Credentials::ApiToken { email, token } => {
                request.header(AUTHORIZATION, Self::auth_header(email, token))
            }
            Credentials::Anonymous => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| AppError::TrackerRequest(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "jira response");
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Tracker {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        request: RequestBuilder,
    ) -> AppResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|err| {
                AppError::TrackerRequest(format!("failed to parse Jira response: {err}"))
            })
    }

    fn issue_fields() -> String {
        [
            "summary",
            "description",
            "status",
            "assignee",
            "comment",
            POINTS_FIELD,
            EPIC_FIELD,
            DEVELOPMENT_FIELD,
        ]
        .join(",")
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn get_issue(&self, key: &str) -> AppResult<Issue> {
        let url = format!("{}/rest/api/2/issue/{}", self.base_url, key.trim());
        let request = self
            .http
            .get(url)
            .query(&[("fields", Self::issue_fields())]);
        let payload: JiraIssue = self.get_json(request).await?;
        Ok(payload.into())
    }

    async fn search_issues(&self, jql: &str) -> AppResult<Vec<Issue>> {
        tracing::debug!(%jql, "searching issues");
        let url = format!("{}/rest/api/2/search", self.base_url);
        let query = [
            ("jql", jql.to_string()),
            ("fields", Self::issue_fields()),
            ("maxResults", SEARCH_LIMIT.to_string()),
        ];
        let request = self.http.get(url).query(&query);
        let payload: JiraSearchResponse = self.get_json(request).await?;
        Ok(payload.issues.into_iter().map(Issue::from).collect())
    }

    async fn post_transition(&self, issue_id: &str, transition_id: &str) -> AppResult<()> {
        let url = format!(
            "{}/rest/api/2/issue/{}/transitions",
            self.base_url, issue_id
        );
        let body = JiraTransitionRequest {
            transition: JiraTransitionId {
                id: transition_id.to_string(),
            },
        };
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body);
        self.send(request).await?;
        tracing::debug!(issue_id, transition_id, "transition posted");
        Ok(())
    }

    async fn active_sprints(&self, board_id: &str) -> AppResult<Vec<Sprint>> {
        let url = format!(
            "{}/rest/agile/1.0/board/{}/sprint",
            self.base_url, board_id
        );
        let request = self.http.get(url).query(&[("state", "active")]);
        let payload: JiraSprintPage = self.get_json(request).await?;
        Ok(payload
            .values
            .into_iter()
            .map(|sprint| Sprint {
                id: sprint.id,
                name: sprint.name,
                state: sprint.state.unwrap_or_default(),
            })
            .collect())
    }
}

/// Extracts `state=OPEN` from the development-status field Jira renders as a
/// debug string, e.g. `{pullrequest={dataType=pullrequest, state=OPEN, ...}}`.
fn parse_pull_request_state(raw: &str) -> Option<String> {
    let head = raw
        .split(", details=PullRequestOverallDetails")
        .next()
        .unwrap_or(raw);
    let (_, state) = head.split_once("state=")?;
    let state = state.split([',', '}']).next().unwrap_or(state).trim();
    non_empty(state).map(str::to_string)
}

fn format_updated(raw: &str) -> String {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .map(|time| time.format("%Y-%m-%d %H:%M %z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Serialize)]
struct JiraTransitionRequest {
    transition: JiraTransitionId,
}

#[derive(Serialize)]
struct JiraTransitionId {
    id: String,
}

#[derive(Deserialize)]
struct JiraSearchResponse {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

#[derive(Deserialize)]
struct JiraSprintPage {
    #[serde(default)]
    values: Vec<JiraSprint>,
}

#[derive(Deserialize)]
struct JiraSprint {
    id: u64,
    name: String,
    state: Option<String>,
}

#[derive(Deserialize)]
struct JiraIssue {
    id: String,
    key: String,
    fields: JiraIssueFields,
}

#[derive(Deserialize)]
struct JiraIssueFields {
    #[serde(default)]
    summary: String,
    description: Option<String>,
    status: Option<JiraNamed>,
    assignee: Option<JiraUser>,
    comment: Option<JiraCommentPage>,
    #[serde(rename = "customfield_10006")]
    points: Option<f64>,
    #[serde(rename = "customfield_10003")]
    epic: Option<Value>,
    #[serde(rename = "customfield_11100")]
    development: Option<Value>,
}

#[derive(Deserialize)]
struct JiraNamed {
    name: String,
}

#[derive(Deserialize)]
struct JiraUser {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Deserialize)]
struct JiraCommentPage {
    #[serde(default)]
    comments: Vec<JiraComment>,
}

#[derive(Deserialize)]
struct JiraComment {
    author: Option<JiraUser>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    updated: String,
}

impl From<JiraIssue> for Issue {
    fn from(issue: JiraIssue) -> Self {
        let fields = issue.fields;
        Issue {
            id: issue.id,
            key: issue.key,
            summary: fields.summary,
            status: fields.status.map(|status| status.name).unwrap_or_default(),
            description: fields.description.filter(|text| !text.trim().is_empty()),
            points: fields.points,
            epic: fields
                .epic
                .as_ref()
                .and_then(Value::as_str)
                .and_then(non_empty)
                .map(str::to_string),
            assignee: fields.assignee.map(|user| user.display_name),
            pull_request_state: fields
                .development
                .as_ref()
                .and_then(Value::as_str)
                .and_then(parse_pull_request_state),
            comments: fields
                .comment
                .map(|page| page.comments)
                .unwrap_or_default()
                .into_iter()
                .map(|comment| Comment {
                    author: comment
                        .author
                        .map(|user| user.display_name)
                        .unwrap_or_default(),
                    updated: format_updated(&comment.updated),
                    body: comment.body,
                })
                .collect(),
        }
    }
}
