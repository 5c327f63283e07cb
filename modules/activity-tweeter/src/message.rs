use std::fmt;

use crate::classifier::{Activity, Template};

/// Joins message text and URL in a transmitted status.
pub const MERGE_DELIMITER: &str = " || ";

/// A rendered announcement before it is merged with its link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMessage {
    /// Message including the title or description.
    pub full: String,
    /// Fallback without the title or description, for when `full` is too long.
    pub short: String,
    pub url: String,
}

/// Message text and URL joined by [`MERGE_DELIMITER`]. This is both what gets
/// posted and what duplicates are detected on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergedMessage(String);

impl MergedMessage {
    pub fn new(text: &str, url: &str) -> Self {
        Self(format!("{text}{MERGE_DELIMITER}{url}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MergedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Template {
    /// Render the full and short forms of this announcement.
    pub fn render(&self) -> CandidateMessage {
        let Template {
            user,
            repo,
            activity,
        } = self;

        match activity {
            Activity::IssueOpened { title, url } => CandidateMessage {
                full: format!("{user} opened an issue in {repo}: {title}"),
                short: format!("{user} opened an issue in {repo}"),
                url: url.clone(),
            },
            Activity::PullRequestOpened { title, url } => CandidateMessage {
                full: format!("{user} created a pull request in {repo}: {title}"),
                short: format!("{user} created a pull request in {repo}"),
                url: url.clone(),
            },
            Activity::ReleasePublished { action, tag, url } => {
                let text = format!("{user} {} release {tag} of {repo}", action.as_str());
                CandidateMessage {
                    full: text.clone(),
                    short: text,
                    url: url.clone(),
                }
            }
            Activity::RepositoryCreated {
                action,
                description,
                url,
            } => {
                let short = format!("{user} {} repository {repo}", action.as_str());
                let full = match description {
                    Some(description) => format!("{short}: {description}"),
                    None => short.clone(),
                };
                CandidateMessage {
                    full,
                    short,
                    url: url.clone(),
                }
            }
        }
    }
}
