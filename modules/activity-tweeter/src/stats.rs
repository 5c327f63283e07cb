use crate::error::ClassifyError;
use crate::publisher::PublishOutcome;

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub events_fetched: u32,
    pub outside_window: u32,
    pub excluded: u32,
    pub unsupported: u32,
    pub malformed: u32,
    pub posted: u32,
    pub posted_short: u32,
    pub suppressed: u32,
    pub remote_duplicates: u32,
    pub failed: u32,
}

impl RunStats {
    pub fn record_skip(&mut self, err: &ClassifyError) {
        match err {
            ClassifyError::Excluded(_) => self.excluded += 1,
            ClassifyError::Unsupported(_) => self.unsupported += 1,
            ClassifyError::MalformedPayload(_) => self.malformed += 1,
        }
    }

    pub fn record_outcome(&mut self, outcome: &PublishOutcome) {
        match outcome {
            PublishOutcome::Posted => self.posted += 1,
            PublishOutcome::PostedShort => self.posted_short += 1,
            PublishOutcome::Suppressed(_) => self.suppressed += 1,
            PublishOutcome::RemoteDuplicate => self.remote_duplicates += 1,
            PublishOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Run Complete ===")?;
        writeln!(f, "Events fetched:     {}", self.events_fetched)?;
        writeln!(f, "Outside window:     {}", self.outside_window)?;
        writeln!(f, "Excluded:           {}", self.excluded)?;
        writeln!(f, "Unsupported:        {}", self.unsupported)?;
        writeln!(f, "Malformed:          {}", self.malformed)?;
        writeln!(f, "Posted:             {}", self.posted)?;
        writeln!(f, "Posted (short):     {}", self.posted_short)?;
        writeln!(f, "Suppressed:         {}", self.suppressed)?;
        writeln!(f, "Remote duplicates:  {}", self.remote_duplicates)?;
        write!(f, "Failed:             {}", self.failed)
    }
}
