//! Event classification.
//!
//! Turns a raw activity event into the fields a status message is rendered
//! from, or explains why the event is not announced.

use github_client::{Event, Payload};

use crate::config::ExclusionRules;
use crate::error::ClassifyError;

/// Release actions worth announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    Created,
    Published,
}

impl ReleaseAction {
    fn parse(action: &str) -> Option<Self> {
        match action {
            "created" => Some(Self::Created),
            "published" => Some(Self::Published),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Published => "published",
        }
    }
}

/// Repository actions worth announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryAction {
    Created,
    Publicized,
}

impl RepositoryAction {
    fn parse(action: &str) -> Option<Self> {
        match action {
            "created" => Some(Self::Created),
            "publicized" => Some(Self::Publicized),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Publicized => "publicized",
        }
    }
}

/// The recognized kinds of activity, each with the fields its message needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    IssueOpened {
        title: String,
        url: String,
    },
    PullRequestOpened {
        title: String,
        url: String,
    },
    ReleasePublished {
        action: ReleaseAction,
        tag: String,
        url: String,
    },
    RepositoryCreated {
        action: RepositoryAction,
        description: Option<String>,
        url: String,
    },
}

/// Classifier output: who did what in which repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub user: String,
    pub repo: String,
    pub activity: Activity,
}

/// Classify one event.
///
/// Exclusion rules are checked first (repository pattern, then event type),
/// then the payload is decoded and matched against the recognized actions.
pub fn classify(
    event: &Event,
    rules: &ExclusionRules,
    user: &str,
) -> Result<Template, ClassifyError> {
    let repo = &event.repo.name;

    if rules.excludes_repo(repo) {
        return Err(ClassifyError::Excluded(format!(
            "events for repository {repo} are excluded"
        )));
    }
    if rules.excludes_event_type(&event.event_type) {
        return Err(ClassifyError::Excluded(format!(
            "{} events are excluded",
            event.event_type
        )));
    }

    let payload = event.parse_payload().map_err(|e| {
        ClassifyError::MalformedPayload(format!("{} in {repo}: {e}", event.event_type))
    })?;

    let activity = match payload {
        Payload::Issues(p) => {
            if p.action != "opened" {
                return Err(unsupported_action(event, &p.action));
            }
            Activity::IssueOpened {
                title: non_empty(event, "issue.title", p.issue.title)?,
                url: non_empty(event, "issue.html_url", p.issue.html_url)?,
            }
        }
        Payload::PullRequest(p) => {
            if p.action != "opened" {
                return Err(unsupported_action(event, &p.action));
            }
            Activity::PullRequestOpened {
                title: non_empty(event, "pull_request.title", p.pull_request.title)?,
                url: non_empty(event, "pull_request.html_url", p.pull_request.html_url)?,
            }
        }
        Payload::Release(p) => {
            let action = ReleaseAction::parse(&p.action)
                .ok_or_else(|| unsupported_action(event, &p.action))?;
            Activity::ReleasePublished {
                action,
                tag: non_empty(event, "release.tag_name", p.release.tag_name)?,
                url: non_empty(event, "release.html_url", p.release.html_url)?,
            }
        }
        Payload::Repository(p) => {
            let action = RepositoryAction::parse(&p.action)
                .ok_or_else(|| unsupported_action(event, &p.action))?;
            let description = event
                .repo
                .description
                .clone()
                .or(p.repository.description)
                .filter(|d| !d.trim().is_empty());
            Activity::RepositoryCreated {
                action,
                description,
                url: non_empty(event, "repository.html_url", p.repository.html_url)?,
            }
        }
        Payload::Other(event_type) => {
            return Err(ClassifyError::Unsupported(format!(
                "{event_type} in {repo}"
            )));
        }
    };

    Ok(Template {
        user: user.to_string(),
        repo: repo.clone(),
        activity,
    })
}

fn unsupported_action(event: &Event, action: &str) -> ClassifyError {
    ClassifyError::Unsupported(format!(
        "action {action:?} on {} in {}",
        event.event_type, event.repo.name
    ))
}

fn non_empty(event: &Event, field: &str, value: String) -> Result<String, ClassifyError> {
    if value.trim().is_empty() {
        return Err(ClassifyError::MalformedPayload(format!(
            "{} in {} has an empty {field}",
            event.event_type, event.repo.name
        )));
    }
    Ok(value)
}
