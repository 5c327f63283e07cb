// Test mocks for the tweeter pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockActivitySource (ActivitySource): fixed event list or a fetch failure
// - MockMicroblog (Microblog): fixed timeline, scripted rejections, records
//   every submitted status
//
// Plus builders for GitHub events and a config with dummy credentials.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use github_client::Event;
use serde_json::json;
use twitter_client::Credentials;

use crate::config::{Config, ExclusionRules};
use crate::error::PublishError;
use crate::traits::{ActivitySource, Microblog};

// ---------------------------------------------------------------------------
// MockActivitySource
// ---------------------------------------------------------------------------

/// Returns the same events on every call, or fails if built with `failing`.
pub struct MockActivitySource {
    events: Vec<Event>,
    failure: Option<String>,
    calls: Mutex<u32>,
}

impl MockActivitySource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            failure: None,
            calls: Mutex::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            events: Vec::new(),
            failure: Some(message.to_string()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ActivitySource for MockActivitySource {
    async fn events(&self, _username: &str) -> Result<Vec<Event>> {
        *self.calls.lock().unwrap() += 1;
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(self.events.clone())
    }
}

// ---------------------------------------------------------------------------
// MockMicroblog
// ---------------------------------------------------------------------------

/// In-memory account. Builder pattern: `.with_recent()`, `.reject_next()`,
/// `.failing_timeline()`.
pub struct MockMicroblog {
    recent: Vec<String>,
    timeline_failure: Option<String>,
    rejections: Mutex<VecDeque<PublishError>>,
    submitted: Mutex<Vec<String>>,
}

impl MockMicroblog {
    pub fn new() -> Self {
        Self {
            recent: Vec::new(),
            timeline_failure: None,
            rejections: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_recent(mut self, posts: &[&str]) -> Self {
        self.recent = posts.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Queue a rejection for the next `post` call. Calls with nothing queued
    /// succeed.
    pub fn reject_next(self, err: PublishError) -> Self {
        self.rejections.lock().unwrap().push_back(err);
        self
    }

    pub fn failing_timeline(mut self, message: &str) -> Self {
        self.timeline_failure = Some(message.to_string());
        self
    }

    /// Every status passed to `post`, accepted or not, in call order.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

impl Default for MockMicroblog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Microblog for MockMicroblog {
    async fn recent_posts(&self) -> Result<Vec<String>> {
        if let Some(message) = &self.timeline_failure {
            bail!("{message}");
        }
        Ok(self.recent.clone())
    }

    async fn post(&self, text: &str) -> std::result::Result<(), PublishError> {
        self.submitted.lock().unwrap().push(text.to_string());
        match self.rejections.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Config for user `alice` with dummy credentials and no exclusions.
pub fn test_config(interval: Duration) -> Config {
    Config {
        github_username: "alice".to_string(),
        github_token: None,
        github_api_url: None,
        interval,
        exclusions: ExclusionRules::default(),
        credentials: Credentials {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            access_token: "at".to_string(),
            access_token_secret: "ats".to_string(),
        },
        twitter_api_url: None,
        http_timeout: None,
    }
}

/// An event as the GitHub API would return it.
pub fn event(
    event_type: &str,
    repo: &str,
    created_at: DateTime<Utc>,
    payload: serde_json::Value,
) -> Event {
    serde_json::from_value(json!({
        "id": format!("{event_type}-{}", created_at.timestamp()),
        "type": event_type,
        "repo": { "id": 1, "name": repo, "url": format!("https://api.github.com/repos/{repo}") },
        "created_at": created_at.to_rfc3339(),
        "payload": payload,
    }))
    .expect("test event should deserialize")
}

pub fn issue_opened(repo: &str, number: u64, title: &str, created_at: DateTime<Utc>) -> Event {
    event(
        "IssuesEvent",
        repo,
        created_at,
        json!({
            "action": "opened",
            "issue": {
                "number": number,
                "title": title,
                "html_url": format!("https://github.com/{repo}/issues/{number}"),
            }
        }),
    )
}

pub fn pull_request_opened(
    repo: &str,
    number: u64,
    title: &str,
    created_at: DateTime<Utc>,
) -> Event {
    event(
        "PullRequestEvent",
        repo,
        created_at,
        json!({
            "action": "opened",
            "number": number,
            "pull_request": {
                "title": title,
                "html_url": format!("https://github.com/{repo}/pull/{number}"),
            }
        }),
    )
}

pub fn release(repo: &str, action: &str, tag: &str, created_at: DateTime<Utc>) -> Event {
    event(
        "ReleaseEvent",
        repo,
        created_at,
        json!({
            "action": action,
            "release": {
                "tag_name": tag,
                "html_url": format!("https://github.com/{repo}/releases/tag/{tag}"),
            }
        }),
    )
}

pub fn repository(
    repo: &str,
    action: &str,
    description: Option<&str>,
    created_at: DateTime<Utc>,
) -> Event {
    event(
        "RepositoryEvent",
        repo,
        created_at,
        json!({
            "action": action,
            "repository": {
                "full_name": repo,
                "html_url": format!("https://github.com/{repo}"),
                "description": description,
            }
        }),
    )
}
