// Trait seams for the two remote platforms.
//
// ActivitySource wraps the GitHub events API, Microblog wraps the Twitter
// account. The pipeline only talks to these traits, so tests drive it with
// the in-memory mocks in `testing.rs`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use github_client::{Event, GitHubClient};
use twitter_client::TwitterClient;

use crate::error::PublishError;

/// Events fetched per run. Only one page is read.
const EVENTS_PER_PAGE: u32 = 100;

#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Public events performed by `username`, in feed order.
    async fn events(&self, username: &str) -> Result<Vec<Event>>;
}

#[async_trait]
pub trait Microblog: Send + Sync {
    /// Texts of the authenticated account's most recent posts.
    async fn recent_posts(&self) -> Result<Vec<String>>;

    /// Publish one status.
    async fn post(&self, text: &str) -> std::result::Result<(), PublishError>;
}

#[async_trait]
impl ActivitySource for GitHubClient {
    async fn events(&self, username: &str) -> Result<Vec<Event>> {
        self.list_public_events(username, EVENTS_PER_PAGE)
            .await
            .with_context(|| format!("list events performed by {username}"))
    }
}

#[async_trait]
impl Microblog for TwitterClient {
    async fn recent_posts(&self) -> Result<Vec<String>> {
        let me = self
            .verify_credentials()
            .await
            .context("verify credentials")?;
        let tweets = self
            .user_timeline(&me.screen_name)
            .await
            .with_context(|| format!("get recent tweets of @{}", me.screen_name))?;
        Ok(tweets.into_iter().map(|t| t.text).collect())
    }

    async fn post(&self, text: &str) -> std::result::Result<(), PublishError> {
        self.update_status(text).await?;
        Ok(())
    }
}
