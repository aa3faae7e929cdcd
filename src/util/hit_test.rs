// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hit testing against existing masks.
//!
//! Overlapping masks are resolved by z-order: the entry with the highest
//! sequence wins, and equal sequences fall back to the later slice position.

use crate::models::annotation::{Mask, Point};
use crate::models::photo::MaskEntry;

/// Topmost entry whose mask contains the point.
pub fn find_object_at_point(point: Point, entries: &[MaskEntry]) -> Option<&MaskEntry> {
    let mut best: Option<&MaskEntry> = None;
    for entry in entries.iter().rev() {
        if !entry.mask.contains(point) {
            continue;
        }
        match best {
            Some(b) if b.sequence >= entry.sequence => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// Index of the last mask in the slice containing the point.
pub fn find_mask_at_point(point: Point, masks: &[Mask]) -> Option<usize> {
    masks.iter().rposition(|m| m.contains(point))
}

/// Every entry containing the point, topmost first.
pub fn hits_at_point(point: Point, entries: &[MaskEntry]) -> Vec<&MaskEntry> {
    let mut hits: Vec<(usize, &MaskEntry)> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.mask.contains(point))
        .collect();
    hits.sort_by(|(ia, a), (ib, b)| b.sequence.cmp(&a.sequence).then(ib.cmp(ia)));
    hits.into_iter().map(|(_, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::BoundingBox;

    fn entry(id: &str, sequence: u64, mask: Mask) -> MaskEntry {
        let click_point = mask.click_point();
        MaskEntry {
            id: id.to_string(),
            sequence,
            mask,
            click_point,
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Mask {
        Mask::Rect(BoundingBox::new(x, y, w, h))
    }

    #[test]
    fn test_later_mask_wins_overlap() {
        let entries = vec![
            entry("a", 0, rect(0.0, 0.0, 100.0, 100.0)),
            entry("b", 1, rect(50.0, 50.0, 100.0, 100.0)),
        ];
        let found = find_object_at_point(Point::new(75.0, 75.0), &entries);
        assert_eq!(found.map(|e| e.id.as_str()), Some("b"));

        let found = find_object_at_point(Point::new(25.0, 25.0), &entries);
        assert_eq!(found.map(|e| e.id.as_str()), Some("a"));
    }

    #[test]
    fn test_no_hit_returns_none() {
        assert!(find_object_at_point(Point::new(1.0, 1.0), &[]).is_none());

        let entries = vec![entry("a", 0, rect(0.0, 0.0, 10.0, 10.0))];
        assert!(find_object_at_point(Point::new(50.0, 50.0), &entries).is_none());
    }

    #[test]
    fn test_sequence_beats_slice_order() {
        // Loaded out of order: "top" sits first in the slice but was added last.
        let entries = vec![
            entry("top", 7, rect(0.0, 0.0, 100.0, 100.0)),
            entry("bottom", 2, rect(0.0, 0.0, 100.0, 100.0)),
        ];
        let found = find_object_at_point(Point::new(50.0, 50.0), &entries);
        assert_eq!(found.map(|e| e.id.as_str()), Some("top"));
    }

    #[test]
    fn test_equal_sequence_falls_back_to_position() {
        let entries = vec![
            entry("first", 3, rect(0.0, 0.0, 100.0, 100.0)),
            entry("second", 3, rect(0.0, 0.0, 100.0, 100.0)),
        ];
        let found = find_object_at_point(Point::new(50.0, 50.0), &entries);
        assert_eq!(found.map(|e| e.id.as_str()), Some("second"));
    }

    #[test]
    fn test_polygon_and_rect_mix() {
        let triangle = Mask::Polygon {
            points: vec![
                Point::new(50.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
        };
        let entries = vec![
            entry("box", 0, rect(0.0, 0.0, 20.0, 20.0)),
            entry("tri", 1, triangle),
        ];
        let found = find_object_at_point(Point::new(10.0, 10.0), &entries);
        assert_eq!(found.map(|e| e.id.as_str()), Some("box"));
    }

    #[test]
    fn test_find_mask_at_point_uses_reverse_order() {
        let masks = vec![rect(0.0, 0.0, 100.0, 100.0), rect(50.0, 50.0, 100.0, 100.0)];
        assert_eq!(find_mask_at_point(Point::new(75.0, 75.0), &masks), Some(1));
        assert_eq!(find_mask_at_point(Point::new(10.0, 10.0), &masks), Some(0));
        assert_eq!(find_mask_at_point(Point::new(500.0, 10.0), &masks), None);
    }

    #[test]
    fn test_hits_at_point_topmost_first() {
        let entries = vec![
            entry("a", 0, rect(0.0, 0.0, 100.0, 100.0)),
            entry("b", 1, rect(50.0, 50.0, 100.0, 100.0)),
            entry("c", 2, rect(200.0, 200.0, 10.0, 10.0)),
        ];
        let ids: Vec<&str> = hits_at_point(Point::new(75.0, 75.0), &entries)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
