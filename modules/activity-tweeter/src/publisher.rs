use tracing::{info, warn};

use crate::dedup::{self, DedupVerdict, SeenThisRun};
use crate::error::PublishError;
use crate::message::{CandidateMessage, MergedMessage};
use crate::traits::Microblog;

/// What happened to one candidate message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Full message posted.
    Posted,
    /// Full message was too long; short message posted instead.
    PostedShort,
    /// Suppressed locally, no network call for this tier.
    Suppressed(DedupVerdict),
    /// The platform reported the status as a duplicate.
    RemoteDuplicate,
    /// Rejected or failed; logged and dropped.
    Failed(String),
}

enum Attempt {
    Done(PublishOutcome),
    TooLong,
}

/// Posts candidate messages for one run.
///
/// Owns the run's [`SeenThisRun`] set; every merged message it considers,
/// including the short fallback, goes through the duplicate guard.
pub struct Publisher<'a> {
    microblog: &'a dyn Microblog,
    recent_posts: &'a [String],
    seen: SeenThisRun,
}

impl<'a> Publisher<'a> {
    pub fn new(microblog: &'a dyn Microblog, recent_posts: &'a [String]) -> Self {
        Self {
            microblog,
            recent_posts,
            seen: SeenThisRun::new(),
        }
    }

    /// Publish `candidate`, falling back to the short form exactly once when
    /// the full form is rejected as too long. Never returns an error.
    pub async fn publish(&mut self, candidate: &CandidateMessage) -> PublishOutcome {
        match self.attempt(&candidate.full, &candidate.url).await {
            Attempt::Done(outcome) => outcome,
            Attempt::TooLong => {
                info!("Status too long, trying again with short message");
                match self.attempt(&candidate.short, &candidate.url).await {
                    Attempt::Done(PublishOutcome::Posted) => PublishOutcome::PostedShort,
                    Attempt::Done(outcome) => outcome,
                    Attempt::TooLong => {
                        warn!(url = %candidate.url, "Short status is still too long, dropped");
                        PublishOutcome::Failed(PublishError::TooLong.to_string())
                    }
                }
            }
        }
    }

    /// The set of merged messages handled so far.
    pub fn seen(&self) -> &SeenThisRun {
        &self.seen
    }

    async fn attempt(&mut self, text: &str, url: &str) -> Attempt {
        let merged = MergedMessage::new(text, url);
        info!(status = %merged, "Trying to post");

        let verdict = dedup::check(&merged, &mut self.seen, self.recent_posts);
        if verdict.is_duplicate() {
            info!(?verdict, "Recently posted, skipped");
            return Attempt::Done(PublishOutcome::Suppressed(verdict));
        }

        match self.microblog.post(merged.as_str()).await {
            Ok(()) => {
                info!("Successfully posted");
                Attempt::Done(PublishOutcome::Posted)
            }
            Err(PublishError::TooLong) => Attempt::TooLong,
            Err(PublishError::Duplicate) => {
                info!("Platform reports a duplicate status, skipped");
                Attempt::Done(PublishOutcome::RemoteDuplicate)
            }
            Err(e) => {
                warn!(error = %e, "Failed to post");
                Attempt::Done(PublishOutcome::Failed(e.to_string()))
            }
        }
    }
}
