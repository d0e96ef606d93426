//! First-activity derivation.
//!
//! A project's "start" for billing purposes is the earliest creation
//! timestamp among its documents and photos, not the stored `started_at`
//! field (which is only a lazily backfilled cache). Because the earliest
//! activity may lie far outside any queried window, the minimum is always
//! taken over the project's complete activity set; a range-limited query by
//! itself can only nominate candidates.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Which trail a derived activity event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySource {
    Document,
    Photo,
}

/// Derived union of a project's document and photo trail. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityEvent {
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub source: ActivitySource,
}

/// The minimum creation timestamp over the given activity set, `None` iff
/// the set is empty.
pub fn first_activity(events: &[ActivityEvent]) -> Option<Timestamp> {
    events.iter().map(|e| e.created_at).min()
}
