use serde::{Deserialize, Serialize};

use crate::difficulty::{DifficultyProfile, HIT_FADE_OUT};

/// The kind of a hit object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitObjectKind {
    /// Instantaneous tap (end time equals start time).
    Circle,
    /// Held object traced over a duration.
    Slider,
    /// Spun object active over a duration.
    Spinner,
}

/// A single hit object in the chart.
///
/// Carries its own copies of the judgement windows (propagated from the
/// difficulty profile on chart reset) so lifetime queries need no profile
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct HitObject {
    /// Chart index, assigned at load.
    pub number: usize,
    /// Start time in milliseconds.
    pub start_time: f64,
    /// End time in milliseconds; equal to `start_time` for circles.
    pub end_time: f64,
    pub kind: HitObjectKind,

    preempt: f64,
    hit50: f64,
    progress: f64,
    finalized: bool,
}

impl HitObject {
    pub fn circle(start_time: f64) -> Self {
        Self::with_kind(start_time, start_time, HitObjectKind::Circle)
    }

    pub fn slider(start_time: f64, end_time: f64) -> Self {
        Self::with_kind(start_time, end_time, HitObjectKind::Slider)
    }

    pub fn spinner(start_time: f64, end_time: f64) -> Self {
        Self::with_kind(start_time, end_time, HitObjectKind::Spinner)
    }

    fn with_kind(start_time: f64, end_time: f64, kind: HitObjectKind) -> Self {
        Self {
            number: 0,
            start_time,
            end_time,
            kind,
            preempt: 0.0,
            hit50: 0.0,
            progress: 0.0,
            finalized: false,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn is_instant(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Copy the relevant windows from the (possibly mod-adjusted) profile
    /// and clear per-playback state. Called for every object on chart
    /// reset.
    pub fn set_difficulty(&mut self, diff: &DifficultyProfile) {
        self.preempt = diff.preempt();
        self.hit50 = diff.hit50();
        self.progress = 0.0;
        self.finalized = false;
    }

    /// Time at which the object enters its preempt window.
    pub fn appear_time(&self) -> f64 {
        self.start_time - self.preempt
    }

    /// Time at which the object leaves the visible/judgeable window and
    /// may be finalized.
    pub fn lifetime_end(&self) -> f64 {
        self.end_time + HIT_FADE_OUT + self.hit50
    }

    /// Per-frame object update. Object-specific animation lives with the
    /// rendering collaborators; the core tracks clamped progress over the
    /// active span.
    pub fn update(&mut self, time: f64) {
        self.progress = if self.is_instant() {
            if time >= self.start_time { 1.0 } else { 0.0 }
        } else {
            ((time - self.start_time) / self.duration()).clamp(0.0, 1.0)
        };
    }

    /// Fraction of the active span elapsed at the last update, 0.0–1.0.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Commit the object's definitive per-playback state. Returns `true`
    /// on the first call only, so completion statistics are reported
    /// exactly once.
    pub fn finalize(&mut self) -> bool {
        if self.finalized {
            return false;
        }
        self.finalized = true;
        true
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}
