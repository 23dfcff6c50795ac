use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub(crate) type AnyData = Arc<dyn Any + Send + Sync>;

/// How a cached key would be served right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than the stale time: served without fetching.
    Fresh,
    /// Older than the stale time: served, then revalidated in the background.
    Aged,
    /// Marked stale by a mutation: the next read waits for a refetch.
    Invalidated,
    /// Nothing stored yet.
    Empty,
}

/// One cached query result.
///
/// `epoch` is replaced by every invalidation or direct write, always with a
/// value drawn from the cache-wide counter. A fetch remembers the epoch it
/// started under and its result is only stored if the epoch is unchanged
/// when it settles, even if the entry was removed and recreated meanwhile.
pub(crate) struct Entry {
    pub data: Option<AnyData>,
    pub fetched_at: Option<Instant>,
    pub invalidated: bool,
    pub refetching: bool,
    pub epoch: u64,
}

impl Entry {
    pub fn new(epoch: u64) -> Self {
        Self {
            data: None,
            fetched_at: None,
            invalidated: false,
            refetching: false,
            epoch,
        }
    }

    pub fn freshness(&self, stale_time: Duration, now: Instant) -> Freshness {
        let (Some(_), Some(fetched_at)) = (&self.data, self.fetched_at) else {
            return Freshness::Empty;
        };
        if self.invalidated {
            Freshness::Invalidated
        } else if now.saturating_duration_since(fetched_at) >= stale_time {
            Freshness::Aged
        } else {
            Freshness::Fresh
        }
    }

    pub fn mark_invalidated(&mut self, epoch: u64) {
        self.invalidated = true;
        self.refetching = false;
        self.epoch = epoch;
    }

    pub fn fill(&mut self, data: AnyData, now: Instant) {
        self.data = Some(data);
        self.fetched_at = Some(now);
        self.invalidated = false;
        self.refetching = false;
    }
}
