//! Outcome of an idempotent insert.

/// Result of an insert keyed by a natural unique key.
///
/// Implementations rely on a unique constraint so concurrent duplicate
/// inserts resolve to one `Inserted` and any number of `AlreadyExists`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveResult<T> {
    /// The record and its audit entry were written.
    Inserted,
    /// A record with the same key exists; nothing was written.
    AlreadyExists(T),
}

impl<T> SaveResult<T> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, SaveResult::Inserted)
    }
}
