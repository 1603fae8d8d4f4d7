// Copyright (c) 2026 rezky_nightky

/// Brightness tier of a rendered cell. Anything fainter than `Dim` is not
/// rendered at all, which keeps the per-tick edit volume bounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intensity {
    Bright,
    Normal,
    Dim,
}

impl Intensity {
    /// Tier for a trail fade value in `[0, 1]` (1.0 at the head).
    pub fn from_fade(fade: f32) -> Option<Self> {
        if fade > 0.8 {
            Some(Intensity::Bright)
        } else if fade > 0.5 {
            Some(Intensity::Normal)
        } else if fade > 0.3 {
            Some(Intensity::Dim)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub intensity: Intensity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_maps_to_tiers_at_the_cutoffs() {
        assert_eq!(Intensity::from_fade(1.0), Some(Intensity::Bright));
        assert_eq!(Intensity::from_fade(0.81), Some(Intensity::Bright));
        assert_eq!(Intensity::from_fade(0.8), Some(Intensity::Normal));
        assert_eq!(Intensity::from_fade(0.51), Some(Intensity::Normal));
        assert_eq!(Intensity::from_fade(0.5), Some(Intensity::Dim));
        assert_eq!(Intensity::from_fade(0.31), Some(Intensity::Dim));
    }

    #[test]
    fn fade_below_dim_cutoff_is_omitted() {
        assert_eq!(Intensity::from_fade(0.3), None);
        assert_eq!(Intensity::from_fade(0.0), None);
    }
}
