//! Pure GitHub REST API client.
//!
//! A minimal client for the parts of the GitHub API needed to read a user's
//! public activity feed.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_client::GitHubClient;
//!
//! let client = GitHubClient::new(None);
//!
//! let events = client.list_public_events("octocat", 100).await?;
//! for event in &events {
//!     println!("{} {}", event.event_type, event.repo.name);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{GitHubError, Result};
pub use types::{
    Event, EventRepo, Issue, IssuesPayload, Payload, PullRequest, PullRequestPayload, Release,
    ReleasePayload, Repository, RepositoryPayload,
};

const BASE_URL: &str = "https://api.github.com";

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), token)
    }

    /// Build on a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_http_client(client: reqwest::Client, token: Option<String>) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
            token,
        }
    }

    /// Point the client at a different API root (GitHub Enterprise, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// List public events performed by `username`, newest first.
    ///
    /// Only the first page is fetched.
    pub async fn list_public_events(&self, username: &str, per_page: u32) -> Result<Vec<Event>> {
        let url = format!("{}/users/{}/events/public", self.base_url, username);
        let mut req = self
            .client
            .get(&url)
            .query(&[("per_page", per_page.to_string())])
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(
                reqwest::header::USER_AGENT,
                concat!("activity-tweeter/", env!("CARGO_PKG_VERSION")),
            );
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let events: Vec<Event> = resp.json().await?;
        tracing::debug!(username, count = events.len(), "Fetched public events");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_public_events() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/alice/events/public"))
            .and(query_param("per_page", "100"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "42",
                    "type": "IssuesEvent",
                    "repo": { "id": 1, "name": "acme/widget" },
                    "created_at": "2024-05-01T10:00:00Z",
                    "payload": {
                        "action": "opened",
                        "issue": { "number": 1, "title": "Bug", "html_url": "https://github.com/acme/widget/issues/1" }
                    }
                }
            ])))
            .mount(&server)
            .await;

        let client = GitHubClient::new(None).with_base_url(server.uri());
        let events = client.list_public_events("alice", 100).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "IssuesEvent");
        assert_eq!(events[0].repo.name, "acme/widget");
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/alice/events/public"))
            .and(header("authorization", "Bearer ghp_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new(Some("ghp_test".into())).with_base_url(server.uri());
        let events = client.list_public_events("alice", 100).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/ghost/events/public"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let client = GitHubClient::new(None).with_base_url(server.uri());
        let err = client.list_public_events("ghost", 100).await.unwrap_err();

        match err {
            GitHubError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
