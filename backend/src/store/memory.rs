use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{CreatePollRequest, Poll};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{PollStore, StoreError};

#[derive(Default)]
struct Polls {
    entries: HashMap<Uuid, Entry>,
    next_seq: u64,
}

struct Entry {
    seq: u64,
    poll: Poll,
}

/// Volatile poll storage backed by a single `RwLock<HashMap>`.
///
/// Writers take the exclusive guard, readers the shared one, so every read
/// sees a point-consistent snapshot. Lost on restart.
#[derive(Default)]
pub struct MemoryPollStore {
    polls: RwLock<Polls>,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStore for MemoryPollStore {
    async fn create(&self, request: CreatePollRequest) -> Result<Poll, StoreError> {
        // Fully built before the guard is taken; publication is a single insert.
        let poll = Poll::new(request);

        let mut polls = self.polls.write().await;
        let seq = polls.next_seq;
        polls.next_seq += 1;
        polls.entries.insert(poll.id, Entry { seq, poll: poll.clone() });

        debug!(poll_id = %poll.id, options = poll.options.len(), "Created poll");
        Ok(poll)
    }

    async fn get(&self, id: Uuid) -> Result<Poll, StoreError> {
        let polls = self.polls.read().await;
        polls.entries.get(&id)
            .map(|entry| entry.poll.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<Poll>, StoreError> {
        let polls = self.polls.read().await;
        let mut entries: Vec<&Entry> = polls.entries.values().collect();
        entries.sort_by(|a, b| {
            b.poll.created_at.cmp(&a.poll.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        Ok(entries.into_iter().map(|entry| entry.poll.clone()).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut polls = self.polls.write().await;
        polls.entries.remove(&id).ok_or(StoreError::NotFound)?;
        debug!(poll_id = %id, "Deleted poll");
        Ok(())
    }

    async fn add_vote(&self, id: Uuid, options: &[String]) -> Result<(), StoreError> {
        let mut polls = self.polls.write().await;
        let entry = polls.entries.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.poll.record_ballot(options);
        debug!(poll_id = %id, voter_count = entry.poll.voter_count, "Recorded vote");
        Ok(())
    }
}
