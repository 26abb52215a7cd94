//! Batched submission with order-preserving id stitching
//!
//! The store assigns ids. The contract here is strict: each submitted chunk
//! must come back with exactly one id per record, in submission order, and
//! `ids[i]` belongs to `records[i]` across the whole input regardless of how
//! it was chunked. A count mismatch means the store silently dropped or
//! merged records; the run aborts rather than guessing a mapping.

use crate::error::{Result, SeederError};
use crate::model::{Id, Persisted};

/// Default per-call record limit
pub const MAX_BATCH_SIZE: usize = 500;

/// Submit `records` in chunks of at most `max_batch_size` and attach the
/// returned ids.
///
/// `submit` is called once per chunk (`ceil(len / max_batch_size)` times) and
/// must return one id per record, in order. Any submit failure or id-count
/// mismatch aborts immediately; no ids are assigned past the failing chunk.
pub fn write_batched<T>(
    records: Vec<T>,
    max_batch_size: usize,
    mut submit: impl FnMut(&[T]) -> Result<Vec<Id>>,
) -> Result<Vec<Persisted<T>>> {
    debug_assert!(max_batch_size > 0);

    let mut persisted = Vec::with_capacity(records.len());
    let mut remaining = records.into_iter();

    loop {
        let chunk: Vec<T> = remaining.by_ref().take(max_batch_size).collect();
        if chunk.is_empty() {
            break;
        }

        let ids = submit(&chunk)?;
        if ids.len() != chunk.len() {
            return Err(SeederError::IdCountMismatch {
                expected: chunk.len(),
                actual: ids.len(),
            });
        }

        persisted.extend(
            chunk
                .into_iter()
                .zip(ids)
                .map(|(record, id)| Persisted::new(id, record)),
        );
    }

    Ok(persisted)
}
