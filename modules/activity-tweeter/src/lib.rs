//! Announces a GitHub user's recent public activity on Twitter.
//!
//! One run fetches the user's public events and the account's recent posts,
//! turns every event inside the polling window into a status message, and
//! posts it unless it was already posted.

pub mod classifier;
pub mod config;
pub mod dedup;
pub mod error;
pub mod message;
pub mod publisher;
pub mod stats;
pub mod traits;
pub mod tweeter;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use classifier::{classify, Activity, Template};
pub use config::{Config, ExclusionRules};
pub use dedup::{DedupVerdict, SeenThisRun};
pub use error::{ClassifyError, PublishError, TweeterError};
pub use message::{CandidateMessage, MergedMessage, MERGE_DELIMITER};
pub use publisher::{PublishOutcome, Publisher};
pub use stats::RunStats;
pub use traits::{ActivitySource, Microblog};
pub use tweeter::{Tweeter, Window};
