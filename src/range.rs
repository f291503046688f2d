// Offset/limit window over the discovered entries. The same filter is used
// for the confirmation listing and for the import itself, so the operator
// always reviews exactly what will be sent.

use crate::discover::{DailyNoteEntry, DailyNoteMapping};

/// Which part of the mapping a run works on.
///
/// `limit` only applies together with `offset`; without an offset the
/// whole mapping is used. `Some(0)` counts as set: `offset: Some(0)` with a
/// limit takes the first `limit` entries, and `limit: Some(0)` selects
/// nothing. Tools that treat a zero offset as "no offset" ignore the limit
/// in that case; this one does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeConfig {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl RangeConfig {
    pub fn new(offset: Option<usize>, limit: Option<usize>) -> Self {
        RangeConfig { offset, limit }
    }

    /// Whether the entry at zero-based position `idx` falls outside the window.
    pub fn should_skip(&self, idx: usize) -> bool {
        let Some(offset) = self.offset else {
            return false;
        };
        if idx < offset {
            return true;
        }
        match self.limit {
            Some(limit) => idx >= offset.saturating_add(limit),
            None => false,
        }
    }

    pub fn includes(&self, idx: usize) -> bool {
        !self.should_skip(idx)
    }
}

impl DailyNoteMapping {
    /// Entries inside `range`, in mapping order.
    pub fn in_range<'a>(
        &'a self,
        range: &'a RangeConfig,
    ) -> impl Iterator<Item = &'a DailyNoteEntry> + 'a {
        self.iter()
            .enumerate()
            .filter(move |(idx, _)| range.includes(*idx))
            .map(|(_, entry)| entry)
    }
}
