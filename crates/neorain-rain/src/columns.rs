//! Per-column fall simulation.

use rand::{
    Rng, SeedableRng,
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

use crate::chars::RAIN_CHARS;
use crate::surface::Surface;

/// Fall speed range in units per tick.
const SPEED_MIN: f32 = 4.0;
const SPEED_MAX: f32 = 12.0;
/// Fraction of the surface dimmed each frame to form the trail.
const TRAIL_FADE: f32 = 0.08;
/// Chance for a column past the bottom edge to restart on a given tick.
const RESTART_CHANCE: f32 = 0.05;
/// Chance to draw a glyph emphasized (outside reduced mode).
const EMPHASIS_CHANCE: f32 = 0.2;
/// Column cap while in reduced mode.
const REDUCED_MAX_COLUMNS: usize = 40;

/// State for a single falling column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Vertical offset of the column head in units; negative while the
    /// head is still above the top edge.
    pub position: f32,
    /// Fall rate in units per tick.
    pub speed: f32,
}

/// All column state plus the randomness feeding it.
///
/// Columns are independent: each keeps its own position and speed, picks
/// a fresh glyph every frame with no memory of the previous one, and
/// restarts on its own schedule so the field never collapses into a
/// synchronized sweep.
#[derive(Debug)]
pub struct ColumnField {
    columns: Vec<Column>,
    slot_width: f32,
    surface_height: f32,
    alphabet: Vec<char>,
    rng: StdRng,
    chance: Uniform<f32>,
    speed: Uniform<f32>,
}

impl ColumnField {
    /// Field with the default alphabet.
    pub fn new(slot_width: f32, seed: u64) -> Self {
        Self::with_alphabet(slot_width, seed, RAIN_CHARS.to_vec())
    }

    /// Field drawing glyphs from a custom alphabet.
    pub fn with_alphabet(slot_width: f32, seed: u64, alphabet: Vec<char>) -> Self {
        debug_assert!(slot_width > 0.0);
        debug_assert!(!alphabet.is_empty());
        Self {
            columns: Vec::new(),
            slot_width,
            surface_height: 0.0,
            alphabet,
            rng: StdRng::seed_from_u64(seed),
            chance: Uniform::new(0.0, 1.0).expect("valid range"),
            speed: Uniform::new(SPEED_MIN, SPEED_MAX).expect("valid range"),
        }
    }

    /// Number of columns in the field.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the field holds no columns yet.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The column states, one per slot, left to right.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Width of one glyph slot in units.
    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    /// Drop all column state and rebuild for the given surface size.
    ///
    /// Column count is `floor(width / slot_width)`. Every column starts
    /// somewhere above the bottom edge (`position` in `[-height, 0)`)
    /// with a fresh speed, so the first sweep arrives staggered rather
    /// than as a solid curtain.
    pub fn reset(&mut self, width: f32, height: f32) {
        self.surface_height = height;
        let count = (width / self.slot_width).floor().max(0.0) as usize;
        // A degenerate height collapses the start band to the top edge.
        let start = Uniform::new(-height, 0.0).ok();
        self.columns = (0..count)
            .map(|_| Column {
                position: start.map(|s| s.sample(&mut self.rng)).unwrap_or(0.0),
                speed: self.speed.sample(&mut self.rng),
            })
            .collect();
    }

    /// Advance the simulation by exactly one frame.
    ///
    /// Fades the whole surface, then draws one glyph per active column
    /// and moves it. In reduced mode only the leftmost 40 columns draw
    /// and emphasis is disabled; timing is untouched.
    pub fn step(&mut self, surface: &mut dyn Surface, reduced: bool) {
        // Stepping before the first reset is a caller bug; draw nothing
        // rather than corrupting anything.
        if self.columns.is_empty() {
            return;
        }
        surface.fade(TRAIL_FADE);

        let active = if reduced {
            self.columns.len().min(REDUCED_MAX_COLUMNS)
        } else {
            self.columns.len()
        };

        for i in 0..active {
            let glyph = self.alphabet[self.rng.random_range(0..self.alphabet.len())];
            let emphasis = !reduced && self.chance.sample(&mut self.rng) < EMPHASIS_CHANCE;
            let x = i as f32 * self.slot_width;
            surface.draw_glyph(x, self.columns[i].position, glyph, emphasis);

            // Past the bottom edge a column restarts only on a die roll,
            // which staggers the restarts; until the roll lands it keeps
            // falling. Restart and advance are mutually exclusive.
            let restart = self.columns[i].position > self.surface_height
                && self.chance.sample(&mut self.rng) < RESTART_CHANCE;
            let col = &mut self.columns[i];
            if restart {
                col.position = -self.slot_width;
                col.speed = self.speed.sample(&mut self.rng);
            } else {
                col.position += col.speed;
            }
        }
    }
}
