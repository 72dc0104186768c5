//! In-process draft store.
//!
//! Drafts are transient per-submission records held between the generate
//! and save steps. There is no background reaper; expired drafts are
//! pruned opportunistically whenever a new draft is inserted.

use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use utsav_core::models::SubmissionDraft;
use utsav_core::AppError;
use uuid::Uuid;

pub struct DraftStore {
    drafts: DashMap<Uuid, SubmissionDraft>,
    ttl: Duration,
}

impl DraftStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            drafts: DashMap::new(),
            ttl,
        }
    }

    pub fn insert(&self, draft: SubmissionDraft) {
        self.prune_expired();
        self.drafts.insert(draft.submission.id, draft);
    }

    pub fn get(&self, id: Uuid) -> Result<SubmissionDraft, AppError> {
        self.drafts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("No submission draft with id {}", id)))
    }

    /// Mutate a draft in place under the map's shard lock, so two
    /// concurrent updates to the same draft cannot interleave.
    pub fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SubmissionDraft) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut entry = self
            .drafts
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("No submission draft with id {}", id)))?;
        f(entry.value_mut())
    }

    fn prune_expired(&self) {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::hours(1));
        let cutoff = Utc::now() - ttl;
        let before = self.drafts.len();
        self.drafts.retain(|_, draft| draft.updated_at >= cutoff);
        let pruned = before.saturating_sub(self.drafts.len());
        if pruned > 0 {
            tracing::debug!(pruned = pruned, "Expired submission drafts pruned");
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.drafts.len()
    }
}
