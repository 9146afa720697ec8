//! Difficulty profile: scalar timing windows derived once per chart/mod
//! combination and consumed read-only by the scheduler and the input
//! synthesizers.

use bitflags::bitflags;

/// Constant visual fade duration after an object's end time, in
/// milliseconds.
pub const HIT_FADE_OUT: f64 = 240.0;

bitflags! {
    /// Gameplay modifiers that affect the derived windows or input timing.
    ///
    /// Rate-scaling modifiers (double/half time) act on the external
    /// playback clock and leave the profile untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct Mods: u32 {
        const EASY = 1 << 0;
        const HIDDEN = 1 << 1;
        const HARD_ROCK = 1 << 2;
        const DOUBLE_TIME = 1 << 3;
        const HALF_TIME = 1 << 4;
        const RELAX = 1 << 5;
        const AUTOPLAY = 1 << 6;
        /// Tighter activation leniency for the relax synthesizer.
        const PRECISE = 1 << 7;
    }
}

impl Default for Mods {
    fn default() -> Self {
        Mods::empty()
    }
}

/// Piecewise-linear ramp through (0, min), (5, mid), (10, max).
fn difficulty_rate(value: f64, min: f64, mid: f64, max: f64) -> f64 {
    if value > 5.0 {
        mid + (max - mid) * (value - 5.0) / 5.0
    } else if value < 5.0 {
        mid - (mid - min) * (5.0 - value) / 5.0
    } else {
        mid
    }
}

/// Precomputed timing windows for one chart/mod combination.
///
/// Immutable after derivation; the scheduler copies the relevant windows
/// into every object on reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    ar: f64,
    od: f64,
    mods: Mods,

    preempt: f64,
    hit300: f64,
    hit100: f64,
    hit50: f64,
}

impl DifficultyProfile {
    pub fn new(ar: f64, od: f64) -> Self {
        Self::with_mods(ar, od, Mods::empty())
    }

    /// Derive the profile from approach rate and overall difficulty,
    /// applying difficulty-scaling modifiers first.
    pub fn with_mods(ar: f64, od: f64, mods: Mods) -> Self {
        let (ar, od) = if mods.contains(Mods::HARD_ROCK) {
            ((ar * 1.4).min(10.0), (od * 1.4).min(10.0))
        } else if mods.contains(Mods::EASY) {
            (ar / 2.0, od / 2.0)
        } else {
            (ar, od)
        };

        Self {
            ar,
            od,
            mods,
            preempt: difficulty_rate(ar, 1800.0, 1200.0, 450.0).max(0.0),
            hit300: difficulty_rate(od, 80.0, 50.0, 20.0),
            hit100: difficulty_rate(od, 140.0, 100.0, 60.0),
            hit50: difficulty_rate(od, 200.0, 150.0, 100.0),
        }
    }

    /// Mod-adjusted approach rate.
    pub fn ar(&self) -> f64 {
        self.ar
    }

    /// Mod-adjusted overall difficulty.
    pub fn od(&self) -> f64 {
        self.od
    }

    pub fn mods(&self) -> Mods {
        self.mods
    }

    /// Time before an object's start at which it becomes visible and
    /// actionable, in milliseconds.
    pub fn preempt(&self) -> f64 {
        self.preempt
    }

    pub fn hit300(&self) -> f64 {
        self.hit300
    }

    pub fn hit100(&self) -> f64 {
        self.hit100
    }

    /// The widest timing-judgement half-window, in milliseconds.
    pub fn hit50(&self) -> f64 {
        self.hit50
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::new(5.0, 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midline_values() {
        let diff = DifficultyProfile::new(5.0, 5.0);
        assert!((diff.preempt() - 1200.0).abs() < 1e-9);
        assert!((diff.hit300() - 50.0).abs() < 1e-9);
        assert!((diff.hit100() - 100.0).abs() < 1e-9);
        assert!((diff.hit50() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn ramp_endpoints() {
        let easy = DifficultyProfile::new(0.0, 0.0);
        assert!((easy.preempt() - 1800.0).abs() < 1e-9);
        assert!((easy.hit50() - 200.0).abs() < 1e-9);

        let hard = DifficultyProfile::new(10.0, 10.0);
        assert!((hard.preempt() - 450.0).abs() < 1e-9);
        assert!((hard.hit50() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hard_rock_caps_at_ten() {
        let diff = DifficultyProfile::with_mods(9.0, 9.0, Mods::HARD_ROCK);
        assert!((diff.ar() - 10.0).abs() < 1e-9);
        assert!((diff.od() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn easy_halves() {
        let diff = DifficultyProfile::with_mods(8.0, 6.0, Mods::EASY);
        assert!((diff.ar() - 4.0).abs() < 1e-9);
        assert!((diff.od() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn preempt_never_negative() {
        // Values past 10 can appear in mod-edited charts; the window must
        // stay a valid (non-negative) duration.
        let diff = DifficultyProfile::new(15.0, 10.0);
        assert!(diff.preempt() >= 0.0);
    }
}
