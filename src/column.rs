// Copyright (c) 2026 rezky_nightky

pub const SEQUENCE_LEN: usize = 40;
pub const SPEED_LOW: f32 = 0.3;
pub const SPEED_HIGH: f32 = 0.6;
pub const TRAIL_LOW: u16 = 10;
pub const TRAIL_HIGH: u16 = 20;

/// Chance per tick that a column past the bottom threshold respawns. Kept
/// probabilistic so respawns stay staggered across columns.
pub const RESPAWN_CHANCE: f32 = 0.04;

/// One vertical rain stream. `x` is fixed for the column's lifetime; `pos`
/// tracks the head and only decreases on respawn. Speed, trail length and the
/// character sequence are redrawn together on each (re)spawn.
#[derive(Clone, Debug)]
pub struct Column {
    pub x: u16,
    pub pos: f32,
    pub speed: f32,
    pub trail_len: u16,
    pub chars: Vec<char>,
    pub char_index: usize,
}

impl Column {
    pub fn head_row(&self) -> i32 {
        self.pos.floor() as i32
    }

    /// Glyph at trail offset `offset` behind the head. The trail reads
    /// backward through the fixed sequence, so as the head advances the
    /// characters appear to stream downward without being regenerated.
    pub fn glyph_at(&self, offset: u16) -> char {
        let len = self.chars.len().max(1) as i64;
        let idx = (self.char_index as i64 - offset as i64).rem_euclid(len);
        self.chars.get(idx as usize).copied().unwrap_or('0')
    }

    /// Advance one tick: head moves by `speed`, cursor steps forward wrapping.
    pub fn step(&mut self) {
        self.pos += self.speed;
        let len = self.chars.len().max(1);
        self.char_index = (self.char_index + 1) % len;
    }

    /// Whole trail has scrolled below the viewport; eligible for respawn.
    pub fn past_bottom(&self, height: u16) -> bool {
        self.head_row() > height as i32 + self.trail_len as i32
    }
}
