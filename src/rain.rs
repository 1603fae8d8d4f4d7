// Copyright (c) 2026 rezky_nightky

use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cell::{Cell, Intensity};
use crate::charset::build_alphabet;
use crate::column::{
    Column, RESPAWN_CHANCE, SEQUENCE_LEN, SPEED_HIGH, SPEED_LOW, TRAIL_HIGH, TRAIL_LOW,
};
use crate::frame::CellMap;

/// Fraction of terminal columns populated with a stream at startup.
const DENSITY: f32 = 0.7;

/// Simulator and projector for the rain. Owns the column collection and a
/// seedable RNG; columns are never removed, only respawned.
pub struct Rain {
    columns: Vec<Column>,
    alphabet: Vec<char>,
    rng: StdRng,
    rand_chance: Uniform<f32>,
    rand_speed: Uniform<f32>,
    rand_trail: Uniform<u16>,
    rand_glyph: Uniform<usize>,
}

impl Rain {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_rng(width, height, StdRng::from_os_rng())
    }

    pub fn with_rng(width: u16, height: u16, rng: StdRng) -> Self {
        let alphabet = build_alphabet();
        let rand_glyph =
            Uniform::new_inclusive(0usize, alphabet.len().saturating_sub(1)).expect("valid range");
        let mut rain = Self {
            columns: Vec::new(),
            alphabet,
            rng,
            rand_chance: Uniform::new(0.0, 1.0).expect("valid range"),
            rand_speed: Uniform::new_inclusive(SPEED_LOW, SPEED_HIGH).expect("valid range"),
            rand_trail: Uniform::new_inclusive(TRAIL_LOW, TRAIL_HIGH).expect("valid range"),
            rand_glyph,
        };
        rain.populate(width, height);
        rain
    }

    fn populate(&mut self, width: u16, height: u16) {
        self.columns.clear();
        for x in 0..width {
            if self.rand_chance.sample(&mut self.rng) < DENSITY {
                let col = self.spawn_column(x, height);
                self.columns.push(col);
            }
        }
    }

    fn generate_sequence(&mut self) -> Vec<char> {
        (0..SEQUENCE_LEN)
            .map(|_| self.alphabet[self.rand_glyph.sample(&mut self.rng)])
            .collect()
    }

    fn spawn_column(&mut self, x: u16, height: u16) -> Column {
        let pos_dist = Uniform::new_inclusive(-(height as f32), 0.0).expect("valid range");
        Column {
            x,
            pos: pos_dist.sample(&mut self.rng),
            speed: self.rand_speed.sample(&mut self.rng),
            trail_len: self.rand_trail.sample(&mut self.rng),
            chars: self.generate_sequence(),
            char_index: 0,
        }
    }

    // The fresh trail length is drawn first so the new start position scales
    // with it, not with the stale one.
    fn respawn_column(&mut self, i: usize) {
        let trail_len = self.rand_trail.sample(&mut self.rng);
        let pos_dist = Uniform::new_inclusive(-(trail_len as f32), 0.0).expect("valid range");
        let pos = pos_dist.sample(&mut self.rng);
        let speed = self.rand_speed.sample(&mut self.rng);
        let chars = self.generate_sequence();

        let col = &mut self.columns[i];
        col.pos = pos;
        col.speed = speed;
        col.trail_len = trail_len;
        col.chars = chars;
        col.char_index = 0;
    }

    /// One simulation tick: every column advances; columns whose whole trail
    /// has left the viewport respawn with a small per-tick probability.
    pub fn advance(&mut self, height: u16) {
        for i in 0..self.columns.len() {
            self.columns[i].step();
            if self.columns[i].past_bottom(height)
                && self.rand_chance.sample(&mut self.rng) < RESPAWN_CHANCE
            {
                self.respawn_column(i);
            }
        }
    }

    /// Project the live columns into this tick's cell map. Columns outside the
    /// current width render nothing; within a column, offsets below the dim
    /// cutoff are dropped. Later columns may overwrite a key (columns own
    /// disjoint x, so in practice they never collide).
    pub fn project(&self, width: u16, height: u16) -> CellMap {
        let mut cells = CellMap::new();
        for col in &self.columns {
            if col.x >= width {
                continue;
            }
            let head = col.head_row();
            for i in 0..col.trail_len {
                let row = head - i as i32;
                if row < 0 || row >= height as i32 {
                    continue;
                }
                let fade = 1.0 - (i as f32 / col.trail_len as f32);
                let Some(intensity) = Intensity::from_fade(fade) else {
                    continue;
                };
                cells.insert(
                    (row as u16, col.x),
                    Cell {
                        glyph: col.glyph_at(i),
                        intensity,
                    },
                );
            }
        }
        cells
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(width: u16, height: u16) -> Rain {
        Rain::with_rng(width, height, StdRng::seed_from_u64(0x1234567))
    }

    #[test]
    fn spawn_parameters_are_within_their_ranges() {
        let rain = seeded(80, 24);
        assert!(!rain.columns.is_empty());
        for col in rain.columns() {
            assert!(col.speed >= SPEED_LOW && col.speed <= SPEED_HIGH);
            assert!(col.trail_len >= TRAIL_LOW && col.trail_len <= TRAIL_HIGH);
            assert!(col.pos >= -24.0 && col.pos <= 0.0);
            assert_eq!(col.chars.len(), SEQUENCE_LEN);
            assert_eq!(col.char_index, 0);
        }
    }

    #[test]
    fn projection_respects_the_trail_bound() {
        let mut rain = seeded(0, 24);
        rain.columns.push(Column {
            x: 3,
            pos: 15.0,
            speed: 0.5,
            trail_len: 10,
            chars: vec!['x'; SEQUENCE_LEN],
            char_index: 0,
        });

        let cells = rain.project(80, 24);
        // Offsets 0..=6 survive the >0.3 cutoff; 7..10 are dropped.
        assert_eq!(cells.len(), 7);
        assert!(cells.len() < 10);
        for row in 9..=15 {
            assert!(cells.contains_key(&(row, 3)));
        }
    }

    #[test]
    fn projection_skips_columns_outside_the_width() {
        let mut rain = seeded(0, 24);
        rain.columns.push(Column {
            x: 100,
            pos: 10.0,
            speed: 0.5,
            trail_len: 10,
            chars: vec!['x'; SEQUENCE_LEN],
            char_index: 0,
        });

        assert!(rain.project(80, 24).is_empty());
        assert!(!rain.project(120, 24).is_empty());
    }

    #[test]
    fn head_glyphs_stream_downward_between_ticks() {
        let mut rain = seeded(0, 24);
        rain.columns.push(Column {
            x: 0,
            pos: 10.0,
            speed: 1.0,
            trail_len: 10,
            chars: (0..SEQUENCE_LEN as u32)
                .map(|v| char::from_u32('a' as u32 + v).unwrap())
                .collect(),
            char_index: 0,
        });

        let before = rain.project(80, 24);
        let head_glyph = before[&(10, 0)].glyph;
        rain.columns[0].step();
        let after = rain.project(80, 24);
        // The old head glyph is now one offset behind the new head.
        assert_eq!(after[&(10, 0)].glyph, head_glyph);
    }

    #[test]
    fn respawn_redraws_within_bounds_and_resets_the_cursor() {
        let mut rain = seeded(0, 24);
        rain.columns.push(Column {
            x: 5,
            pos: 100.0,
            speed: 0.5,
            trail_len: 12,
            chars: vec!['x'; SEQUENCE_LEN],
            char_index: 7,
        });

        let mut respawned = false;
        for _ in 0..10_000 {
            let before = rain.columns[0].pos;
            rain.advance(24);
            if rain.columns[0].pos < before {
                respawned = true;
                break;
            }
        }
        assert!(respawned, "column never respawned");

        let col = &rain.columns[0];
        assert!(col.pos >= -(col.trail_len as f32) && col.pos <= 0.0);
        assert!(col.speed >= SPEED_LOW && col.speed <= SPEED_HIGH);
        assert!(col.trail_len >= TRAIL_LOW && col.trail_len <= TRAIL_HIGH);
        assert_eq!(col.chars.len(), SEQUENCE_LEN);
        assert_eq!(col.char_index, 0);
        assert_eq!(col.x, 5);
    }

    #[test]
    fn columns_below_threshold_never_respawn() {
        let mut rain = seeded(0, 24);
        rain.columns.push(Column {
            x: 0,
            pos: 0.0,
            speed: 0.5,
            trail_len: 10,
            chars: vec!['x'; SEQUENCE_LEN],
            char_index: 0,
        });

        for _ in 0..20 {
            let before = rain.columns[0].pos;
            rain.advance(24);
            assert!(rain.columns[0].pos > before);
        }
    }
}
