// Copyright (c) 2026 rezky_nightky

use std::collections::HashMap;

use crate::cell::Cell;

/// One tick's visible cells, keyed by `(row, col)`. Built fresh each tick,
/// diffed against the previous tick's map, then kept as that previous map.
pub type CellMap = HashMap<(u16, u16), Cell>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Clear { row: u16, col: u16 },
    Write { row: u16, col: u16, cell: Cell },
}

/// Minimal edit list turning the displayed `prev` frame into `cur`: one clear
/// per vanished key, one write per new or changed key, nothing for keys whose
/// cell is unchanged. Edits target distinct screen cells, so their order does
/// not matter.
pub fn diff(prev: &CellMap, cur: &CellMap) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(cur.len());

    for &(row, col) in prev.keys() {
        if !cur.contains_key(&(row, col)) {
            edits.push(Edit::Clear { row, col });
        }
    }

    for (&(row, col), &cell) in cur {
        if prev.get(&(row, col)) != Some(&cell) {
            edits.push(Edit::Write { row, col, cell });
        }
    }

    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Intensity;

    fn cell(glyph: char, intensity: Intensity) -> Cell {
        Cell { glyph, intensity }
    }

    #[test]
    fn diff_emits_one_clear_per_vanished_key() {
        let mut prev = CellMap::new();
        prev.insert((1, 2), cell('a', Intensity::Normal));
        prev.insert((3, 4), cell('b', Intensity::Dim));
        let cur = CellMap::new();

        let edits = diff(&prev, &cur);
        assert_eq!(edits.len(), 2);
        assert!(edits.contains(&Edit::Clear { row: 1, col: 2 }));
        assert!(edits.contains(&Edit::Clear { row: 3, col: 4 }));
    }

    #[test]
    fn diff_emits_writes_only_for_new_or_changed_cells() {
        let mut prev = CellMap::new();
        prev.insert((0, 0), cell('x', Intensity::Bright));
        prev.insert((0, 1), cell('y', Intensity::Normal));

        let mut cur = CellMap::new();
        cur.insert((0, 0), cell('x', Intensity::Bright)); // unchanged
        cur.insert((0, 1), cell('y', Intensity::Dim)); // intensity changed
        cur.insert((0, 2), cell('z', Intensity::Normal)); // new

        let edits = diff(&prev, &cur);
        assert_eq!(edits.len(), 2);
        assert!(edits.contains(&Edit::Write {
            row: 0,
            col: 1,
            cell: cell('y', Intensity::Dim)
        }));
        assert!(edits.contains(&Edit::Write {
            row: 0,
            col: 2,
            cell: cell('z', Intensity::Normal)
        }));
    }

    #[test]
    fn identical_frames_produce_no_edits() {
        let mut prev = CellMap::new();
        prev.insert((5, 5), cell('q', Intensity::Bright));
        prev.insert((6, 5), cell('r', Intensity::Normal));
        let cur = prev.clone();

        assert!(diff(&prev, &cur).is_empty());
    }

    #[test]
    fn empty_previous_frame_rewrites_everything() {
        let prev = CellMap::new();
        let mut cur = CellMap::new();
        cur.insert((2, 2), cell('m', Intensity::Normal));
        cur.insert((2, 3), cell('n', Intensity::Dim));

        let edits = diff(&prev, &cur);
        assert_eq!(edits.len(), cur.len());
        assert!(edits
            .iter()
            .all(|e| matches!(e, Edit::Write { .. })));
    }
}
