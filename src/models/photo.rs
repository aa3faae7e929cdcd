// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Existing masks of one photo.
//!
//! The collection is owned by the persistence side; the engine only reads it
//! for hit testing. Each entry carries an explicit z-order sequence so that
//! reordering or out-of-order loading does not change which mask is on top.

use super::annotation::{Mask, Point, Selection};
use crate::util::hit_test;

/// An annotation already attached to the photo.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskEntry {
    pub id: String,
    /// Monotonic insertion order; higher is drawn on top.
    pub sequence: u64,
    pub mask: Mask,
    pub click_point: Point,
}

/// All masks on a photo, plus the photo's pixel dimensions.
#[derive(Debug, Clone)]
pub struct PhotoMasks {
    pub photo_id: String,
    pub width: u32,
    pub height: u32,
    entries: Vec<MaskEntry>,
    next_sequence: u64,
}

impl PhotoMasks {
    /// Create an empty collection for the given photo.
    pub fn new(photo_id: String, width: u32, height: u32) -> Self {
        Self {
            photo_id,
            width,
            height,
            entries: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Add a freshly finished selection on top of every existing mask.
    pub fn push(&mut self, selection: Selection) -> &MaskEntry {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.entries.push(MaskEntry {
            id: format!("object-{}", u128::from(sequence) + 1),
            sequence,
            mask: selection.mask,
            click_point: selection.click_point,
        });
        log::info!(
            "Added mask to photo {}, total: {}",
            self.photo_id,
            self.entries.len()
        );
        &self.entries[self.entries.len() - 1]
    }

    /// Insert an entry that already has a sequence (e.g. loaded from storage).
    pub fn insert(&mut self, entry: MaskEntry) {
        self.next_sequence = self.next_sequence.max(entry.sequence.saturating_add(1));
        self.entries.push(entry);
    }

    pub fn remove(&mut self, id: &str) -> Option<MaskEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&MaskEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[MaskEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Topmost mask containing the image-space point.
    pub fn find_at(&self, point: Point) -> Option<&MaskEntry> {
        hit_test::find_object_at_point(point, &self.entries)
    }
}
