use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;

/// Event type names as they appear in the `type` field of the events API.
pub const ISSUES_EVENT: &str = "IssuesEvent";
pub const PULL_REQUEST_EVENT: &str = "PullRequestEvent";
pub const RELEASE_EVENT: &str = "ReleaseEvent";
pub const REPOSITORY_EVENT: &str = "RepositoryEvent";

/// A single entry from `/users/{user}/events/public`.
///
/// The payload is kept as raw JSON; its shape depends on `event_type` and is
/// decoded on demand with [`Event::parse_payload`].
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Repository reference embedded in an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    /// `owner/name`
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Event {
    /// Decode the type-specific payload.
    ///
    /// Event types this crate has no model for come back as
    /// [`Payload::Other`] rather than an error.
    pub fn parse_payload(&self) -> Result<Payload> {
        let payload = match self.event_type.as_str() {
            ISSUES_EVENT => Payload::Issues(serde_json::from_value(self.payload.clone())?),
            PULL_REQUEST_EVENT => {
                Payload::PullRequest(serde_json::from_value(self.payload.clone())?)
            }
            RELEASE_EVENT => Payload::Release(serde_json::from_value(self.payload.clone())?),
            REPOSITORY_EVENT => {
                Payload::Repository(serde_json::from_value(self.payload.clone())?)
            }
            other => Payload::Other(other.to_string()),
        };
        Ok(payload)
    }
}

/// Typed event payloads.
#[derive(Debug, Clone)]
pub enum Payload {
    Issues(IssuesPayload),
    PullRequest(PullRequestPayload),
    Release(ReleasePayload),
    Repository(RepositoryPayload),
    Other(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuesPayload {
    pub action: String,
    pub issue: Issue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub action: String,
    #[serde(default)]
    pub number: Option<u64>,
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub title: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleasePayload {
    pub action: String,
    pub release: Release,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub action: String,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(event_type: &str, payload: serde_json::Value) -> Event {
        serde_json::from_value(json!({
            "id": "1",
            "type": event_type,
            "repo": { "id": 7, "name": "acme/widget", "url": "https://api.github.com/repos/acme/widget" },
            "created_at": "2024-05-01T10:00:00Z",
            "payload": payload,
        }))
        .unwrap()
    }

    #[test]
    fn issues_payload_decodes() {
        let e = event(
            "IssuesEvent",
            json!({
                "action": "opened",
                "issue": { "number": 1, "title": "Bug", "html_url": "https://github.com/acme/widget/issues/1" }
            }),
        );

        match e.parse_payload().unwrap() {
            Payload::Issues(p) => {
                assert_eq!(p.action, "opened");
                assert_eq!(p.issue.title, "Bug");
                assert_eq!(p.issue.number, 1);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
        assert_eq!(e.repo.name, "acme/widget");
        assert!(e.repo.description.is_none());
    }

    #[test]
    fn unknown_event_type_is_other() {
        let e = event("WatchEvent", json!({ "action": "started" }));
        assert!(matches!(e.parse_payload().unwrap(), Payload::Other(t) if t == "WatchEvent"));
    }

    #[test]
    fn shape_mismatch_is_parse_error() {
        let e = event("ReleaseEvent", json!({ "action": "published" }));
        assert!(matches!(
            e.parse_payload(),
            Err(crate::GitHubError::Parse(_))
        ));
    }

    #[test]
    fn repository_description_is_optional() {
        let e = event(
            "RepositoryEvent",
            json!({
                "action": "created",
                "repository": { "full_name": "acme/widget", "html_url": "https://github.com/acme/widget", "description": null }
            }),
        );

        match e.parse_payload().unwrap() {
            Payload::Repository(p) => assert!(p.repository.description.is_none()),
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
