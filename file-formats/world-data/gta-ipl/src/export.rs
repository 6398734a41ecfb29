//! Shared duplicate-id bookkeeping for the IPL and IDE writers

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Options for [`write_ipl`](crate::write_ipl)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IplWriteOptions {
    /// Link each base model to the id of its `lod`-prefixed counterpart in
    /// the same export set
    pub lod_autosearch: bool,
}

/// Tracks written ids so that only the first record per id is emitted
#[derive(Debug, Default)]
pub(crate) struct IdGuard {
    seen: HashSet<i32>,
    duplicates: Vec<i32>,
    written: usize,
}

impl IdGuard {
    /// Whether a record with `id` may be written. Later repeats are refused
    /// and remembered.
    pub fn admit(&mut self, id: i32) -> bool {
        if self.seen.insert(id) {
            self.written += 1;
            return true;
        }
        log::warn!("Skipping record with duplicate id {id}");
        if !self.duplicates.contains(&id) {
            self.duplicates.push(id);
        }
        false
    }

    /// Number of written records, or every duplicated id
    pub fn finish(self) -> Result<usize> {
        if self.duplicates.is_empty() {
            Ok(self.written)
        } else {
            Err(Error::DuplicateIds(self.duplicates))
        }
    }
}
