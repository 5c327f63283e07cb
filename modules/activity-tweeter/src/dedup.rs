//! Duplicate suppression.
//!
//! Two layers, checked in order:
//! 1. Messages already handled during this run.
//! 2. Posts already on the account's recent timeline, compared on every
//!    `||`-separated segment except the last one. The last segment is the
//!    link, which the platform rewrites to its own shortener on publish.
//!
//! The segment comparison splits on the raw `||` token, so message text that
//! itself contains `||` yields extra segments. That behavior is kept as is.

use std::collections::HashSet;

use crate::message::MergedMessage;

const SEGMENT_SEPARATOR: &str = "||";

/// Merged messages handled during one run. Grows monotonically.
#[derive(Debug, Default)]
pub struct SeenThisRun {
    seen: HashSet<String>,
}

impl SeenThisRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, merged: &MergedMessage) -> bool {
        self.seen.contains(merged.as_str())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn mark(&mut self, merged: &MergedMessage) {
        self.seen.insert(merged.as_str().to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupVerdict {
    NotDuplicate,
    AlreadyHandledThisRun,
    MatchesRecentRemotePost,
}

impl DedupVerdict {
    pub fn is_duplicate(&self) -> bool {
        !matches!(self, DedupVerdict::NotDuplicate)
    }
}

/// Decide whether `merged` should be suppressed.
///
/// The message is recorded in `seen` whenever it was not already there, even
/// if it then matches a remote post.
pub fn check(merged: &MergedMessage, seen: &mut SeenThisRun, recent: &[String]) -> DedupVerdict {
    if seen.contains(merged) {
        return DedupVerdict::AlreadyHandledThisRun;
    }
    seen.mark(merged);

    if recent
        .iter()
        .any(|post| same_except_link(merged.as_str(), post))
    {
        return DedupVerdict::MatchesRecentRemotePost;
    }

    DedupVerdict::NotDuplicate
}

fn same_except_link(candidate: &str, post: &str) -> bool {
    let candidate: Vec<&str> = candidate.split(SEGMENT_SEPARATOR).collect();
    let post: Vec<&str> = post.split(SEGMENT_SEPARATOR).collect();
    if candidate.len() != post.len() {
        return false;
    }

    let keep = post.len() - 1;
    candidate[..keep] == post[..keep]
}
