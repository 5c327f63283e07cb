//! The pipeline driver.
//!
//! A run goes Fetching → Iterating → Done. Fetching pulls the user's events
//! and the account's recent posts; either failing aborts the run. Iterating
//! walks the events in feed order and contains every per-event failure.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use github_client::Event;
use tracing::{debug, info};

use crate::classifier::classify;
use crate::config::{Config, ExclusionRules};
use crate::error::{Result, TweeterError};
use crate::publisher::Publisher;
use crate::stats::RunStats;
use crate::traits::{ActivitySource, Microblog};

/// The open interval `(from, until)` of event timestamps eligible this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl Window {
    pub fn ending_at(until: DateTime<Utc>, interval: Duration) -> Result<Self> {
        let interval = chrono::Duration::from_std(interval).map_err(|e| {
            TweeterError::ConfigurationMissing(format!("interval out of range: {e}"))
        })?;
        Ok(Self {
            from: until - interval,
            until,
        })
    }

    /// Both bounds are exclusive.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from < at && at < self.until
    }
}

/// What Fetching hands to Iterating.
struct Fetched {
    window: Window,
    events: Vec<Event>,
    recent_posts: Vec<String>,
}

pub struct Tweeter {
    source: Arc<dyn ActivitySource>,
    microblog: Arc<dyn Microblog>,
    username: String,
    interval: Duration,
    rules: ExclusionRules,
}

impl Tweeter {
    pub fn new(
        source: Arc<dyn ActivitySource>,
        microblog: Arc<dyn Microblog>,
        config: &Config,
    ) -> Self {
        Self {
            source,
            microblog,
            username: config.github_username.clone(),
            interval: config.interval,
            rules: config.exclusions.clone(),
        }
    }

    /// Run once for the window ending now.
    pub async fn run(&self) -> Result<RunStats> {
        self.run_at(Utc::now()).await
    }

    /// Run once for the window ending at `until`.
    pub async fn run_at(&self, until: DateTime<Utc>) -> Result<RunStats> {
        let fetched = self.fetch(until).await?;
        Ok(self.iterate(fetched).await)
    }

    async fn fetch(&self, until: DateTime<Utc>) -> Result<Fetched> {
        let window = Window::ending_at(until, self.interval)?;
        info!(from = %window.from, until = %window.until, user = %self.username, "Fetching activity");

        let events = self
            .source
            .events(&self.username)
            .await
            .map_err(|e| TweeterError::FetchFailed(format!("{e:#}")))?;

        let recent_posts = self
            .microblog
            .recent_posts()
            .await
            .map_err(|e| TweeterError::FetchFailed(format!("{e:#}")))?;

        info!(
            events = events.len(),
            recent_posts = recent_posts.len(),
            "Fetched events and recent posts"
        );

        Ok(Fetched {
            window,
            events,
            recent_posts,
        })
    }

    async fn iterate(&self, fetched: Fetched) -> RunStats {
        let Fetched {
            window,
            events,
            recent_posts,
        } = fetched;

        let mut stats = RunStats {
            events_fetched: events.len() as u32,
            ..Default::default()
        };
        let mut publisher = Publisher::new(self.microblog.as_ref(), &recent_posts);

        for event in &events {
            if !window.contains(event.created_at) {
                debug!(id = %event.id, created_at = %event.created_at, "Outside window");
                stats.outside_window += 1;
                continue;
            }

            let template = match classify(event, &self.rules, &self.username) {
                Ok(template) => template,
                Err(e) => {
                    // Not critical, only this event is skipped.
                    info!(id = %event.id, reason = %e, "Event skipped");
                    stats.record_skip(&e);
                    continue;
                }
            };

            let outcome = publisher.publish(&template.render()).await;
            stats.record_outcome(&outcome);
        }

        stats
    }
}
