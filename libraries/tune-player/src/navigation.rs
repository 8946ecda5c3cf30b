//! Wraparound next/previous over an ordered id list
//!
//! The active id is located by equality (first occurrence). When it is not in
//! the list the position counts as "before the first entry", so `next` lands
//! on the first id and `previous` wraps to the last one.

use crate::types::TrackId;

/// Id that follows `active`, wrapping to the first entry
///
/// Returns `None` only for an empty list.
pub fn next_id<'a>(ids: &'a [TrackId], active: Option<&TrackId>) -> Option<&'a TrackId> {
    let first = ids.first()?;
    let next = match position(ids, active) {
        Some(index) => ids.get(index + 1),
        None => ids.first(),
    };
    Some(next.unwrap_or(first))
}

/// Id that precedes `active`, wrapping to the last entry
///
/// Returns `None` only for an empty list.
pub fn previous_id<'a>(ids: &'a [TrackId], active: Option<&TrackId>) -> Option<&'a TrackId> {
    let last = ids.last()?;
    let previous = position(ids, active)
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| ids.get(index));
    Some(previous.unwrap_or(last))
}

fn position(ids: &[TrackId], active: Option<&TrackId>) -> Option<usize> {
    let active = active?;
    ids.iter().position(|id| id == active)
}
