//! Decorative crackle line elements.
//!
//! Thin pulsing lines scattered across the surface once at startup.
//! Placement and pulse timing live here; how a crackle actually looks is
//! the renderer's business.

use rand::{
    SeedableRng,
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

/// Number of crackles on a full-size surface.
const FULL_COUNT: usize = 15;
/// Number of crackles in reduced mode.
const REDUCED_COUNT: usize = 8;

/// A single decorative line element.
#[derive(Debug, Clone)]
pub struct Crackle {
    /// Horizontal anchor as a fraction of surface width.
    pub x: f32,
    /// Vertical anchor as a fraction of surface height.
    pub y: f32,
    /// Length in surface units.
    pub length: f32,
    /// Delay before the pulse cycle starts, in milliseconds.
    pub delay_ms: f64,
    /// Length of one pulse cycle, in milliseconds.
    pub duration_ms: f64,
}

impl Crackle {
    /// Pulse brightness at `now_ms`, in `[0, 1]`.
    ///
    /// Zero until the delay has passed, then a triangular wave over each
    /// cycle: ramp up to the midpoint, back down after.
    pub fn intensity(&self, now_ms: f64) -> f32 {
        let active = now_ms - self.delay_ms;
        if active < 0.0 {
            return 0.0;
        }
        let phase = (active % self.duration_ms) / self.duration_ms;
        (1.0 - (2.0 * phase - 1.0).abs()) as f32
    }
}

/// The set of placed crackles.
#[derive(Debug)]
pub struct CrackleField {
    crackles: Vec<Crackle>,
}

impl CrackleField {
    /// Place a fresh set of crackles; fewer when `reduced`.
    ///
    /// Anchors are fractional, so the set survives resizes without
    /// regeneration.
    pub fn generate(seed: u64, reduced: bool) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let frac = Uniform::new(0.0f32, 1.0).expect("valid range");
        let length = Uniform::new(100.0f32, 300.0).expect("valid range");
        let delay = Uniform::new(0.0f64, 3000.0).expect("valid range");
        let duration = Uniform::new(1000.0f64, 3000.0).expect("valid range");

        let count = if reduced { REDUCED_COUNT } else { FULL_COUNT };
        let crackles = (0..count)
            .map(|_| Crackle {
                x: frac.sample(&mut rng),
                y: frac.sample(&mut rng),
                length: length.sample(&mut rng),
                delay_ms: delay.sample(&mut rng),
                duration_ms: duration.sample(&mut rng),
            })
            .collect();
        Self { crackles }
    }

    /// The placed crackles.
    pub fn crackles(&self) -> &[Crackle] {
        &self.crackles
    }

    pub fn len(&self) -> usize {
        self.crackles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crackles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_mode() {
        assert_eq!(CrackleField::generate(1, false).len(), 15);
        assert_eq!(CrackleField::generate(1, true).len(), 8);
    }

    #[test]
    fn test_generated_ranges() {
        let field = CrackleField::generate(42, false);
        for c in field.crackles() {
            assert!(c.x >= 0.0 && c.x < 1.0);
            assert!(c.y >= 0.0 && c.y < 1.0);
            assert!(c.length >= 100.0 && c.length < 300.0);
            assert!(c.delay_ms >= 0.0 && c.delay_ms < 3000.0);
            assert!(c.duration_ms >= 1000.0 && c.duration_ms < 3000.0);
        }
    }

    #[test]
    fn test_same_seed_same_placement() {
        let a = CrackleField::generate(9, false);
        let b = CrackleField::generate(9, false);
        for (x, y) in a.crackles().iter().zip(b.crackles()) {
            assert_eq!(x.x, y.x);
            assert_eq!(x.delay_ms, y.delay_ms);
        }
    }

    #[test]
    fn test_intensity_silent_before_delay() {
        let crackle = Crackle {
            x: 0.5,
            y: 0.5,
            length: 150.0,
            delay_ms: 1000.0,
            duration_ms: 2000.0,
        };
        assert_eq!(crackle.intensity(0.0), 0.0);
        assert_eq!(crackle.intensity(999.0), 0.0);
    }

    #[test]
    fn test_intensity_peaks_mid_cycle() {
        let crackle = Crackle {
            x: 0.5,
            y: 0.5,
            length: 150.0,
            delay_ms: 0.0,
            duration_ms: 2000.0,
        };
        assert_eq!(crackle.intensity(0.0), 0.0);
        assert!((crackle.intensity(1000.0) - 1.0).abs() < 1e-6);
        assert!(crackle.intensity(500.0) > 0.0);
        // Cycles repeat.
        assert!((crackle.intensity(3000.0) - 1.0).abs() < 1e-6);
    }
}
