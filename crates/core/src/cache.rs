//! Memoized derived values.
//!
//! `projects.started_at` is a cache of the derived first-activity timestamp,
//! never a source of truth: it may be absent even when activity exists, and
//! once written it is never retroactively corrected. Modelling it as
//! [`Cached`] keeps those semantics in the type system instead of comments.

/// A lazily persisted derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cached<T> {
    /// Never computed and stored; a read that derives the value should
    /// write it through.
    Missing,
    /// Previously backfilled. Kept as-is even if a recomputation would
    /// disagree.
    Stored(T),
}

impl<T> Cached<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Cached::Stored(v),
            None => Cached::Missing,
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Cached::Stored(v) => Some(v),
            Cached::Missing => None,
        }
    }

    /// The value to persist after deriving `computed`, if any: `Some` only
    /// when nothing is stored yet. Concurrent callers racing through this
    /// converge on the identical value, so the write needs no locking.
    pub fn backfill_with(&self, computed: T) -> Option<T> {
        match self {
            Cached::Missing => Some(computed),
            Cached::Stored(_) => None,
        }
    }
}
