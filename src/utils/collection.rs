//! Upsert and delete-by-id helpers over whole collections

use crate::traits::Record;

/// Outcome of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An existing record with the same id was replaced in place
    Replaced,
    /// The record was appended
    Inserted,
}

/// Replace the record with a matching id in place, or append it
pub fn upsert<T: Record>(records: &mut Vec<T>, record: T) -> Upsert {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(existing) => {
            *existing = record;
            Upsert::Replaced
        }
        None => {
            records.push(record);
            Upsert::Inserted
        }
    }
}

/// Remove the record with the given id; returns whether anything was removed
pub fn remove_by_id<T: Record>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

/// Check whether a record with the given id exists
pub fn contains_id<T: Record>(records: &[T], id: &str) -> bool {
    records.iter().any(|r| r.id() == id)
}
