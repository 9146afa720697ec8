//! Chart container and hit-object lifecycle scheduler.
//!
//! The chart owns the full ordered object list. Each `update` partitions it
//! into pending → active → finalized using the difficulty profile's
//! windows: objects are promoted with a prefix scan over the chart-ordered
//! pending range, the active set is kept sorted by end time, and objects
//! past their fade-out window are finalized exactly once and drained from
//! the front.

use serde::{Deserialize, Serialize};

use presto_timing::Timings;

use crate::difficulty::DifficultyProfile;
use crate::object::{HitObject, HitObjectKind};

/// A break section with no actionable objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pause {
    pub start_time: f64,
    pub end_time: f64,
}

impl Pause {
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }
}

/// Lifecycle transitions reported by `Chart::update` for HUD and ruleset
/// collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEvent {
    /// An object entered its preempt window.
    Promoted { number: usize },
    /// An object left its fade-out window; its per-playback statistics are
    /// definitive.
    Finalized { number: usize },
}

/// The playable timeline of hit objects and timing points for one
/// difficulty of a song.
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub artist: String,
    pub creator: String,
    /// Difficulty name.
    pub version: String,
    pub md5: String,

    pub diff: DifficultyProfile,
    pub timings: Timings,
    pub pauses: Vec<Pause>,

    hit_objects: Vec<HitObject>,

    // Scheduler state. Pending is the chart-ordered suffix starting at
    // `next_pending`; `processed` holds active object indices sorted by
    // end time.
    next_pending: usize,
    processed: Vec<usize>,
    finalized_count: usize,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            creator: String::new(),
            version: String::new(),
            md5: String::new(),
            diff: DifficultyProfile::default(),
            timings: Timings::new(),
            pauses: Vec::new(),
            hit_objects: Vec::new(),
            next_pending: 0,
            processed: Vec::new(),
            finalized_count: 0,
        }
    }

    /// Append an object during chart load.
    pub fn add_object(&mut self, object: HitObject) {
        self.hit_objects.push(object);
    }

    /// Finish loading: verify chart order, assign object numbers and
    /// finalize the timing timeline.
    ///
    /// The scheduler's prefix-scan promotion requires non-decreasing start
    /// times; a chart that violates this is reordered (with a warning)
    /// rather than trusted.
    pub fn finalize_load(&mut self) {
        let sorted = self
            .hit_objects
            .windows(2)
            .all(|w| w[0].start_time <= w[1].start_time);
        if !sorted {
            log::warn!("hit objects out of chart order, restoring start-time order");
            self.hit_objects
                .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        }
        for (number, object) in self.hit_objects.iter_mut().enumerate() {
            object.number = number;
        }
        self.timings.finalize_points();
    }

    /// Restore pending to the full object list in chart order, clear the
    /// active set, rewind the timeline and propagate the (possibly
    /// mod-adjusted) difficulty profile to every object.
    pub fn reset(&mut self) {
        self.next_pending = 0;
        self.processed.clear();
        self.finalized_count = 0;
        self.timings.reset();

        for object in &mut self.hit_objects {
            object.set_difficulty(&self.diff);
        }
    }

    /// Advance the scheduler to `time`.
    ///
    /// Time must be non-decreasing between resets; seeking backward without
    /// a `reset` leaves the partition stale.
    pub fn update(&mut self, time: f64) -> Vec<ChartEvent> {
        self.timings.update(time);

        let mut events = Vec::new();

        // Promote from pending while the head is inside its preempt
        // window. Pending is chart-ordered, so this is a prefix scan.
        let before = self.processed.len();
        while self.next_pending < self.hit_objects.len()
            && self.hit_objects[self.next_pending].start_time - self.diff.preempt() <= time
        {
            self.processed.push(self.next_pending);
            events.push(ChartEvent::Promoted {
                number: self.hit_objects[self.next_pending].number,
            });
            self.next_pending += 1;
        }

        // Promotion order (by start time) does not imply fade-out order: a
        // short circle can end before a long slider promoted earlier.
        if self.processed.len() > before {
            let objects = &self.hit_objects;
            self.processed
                .sort_by(|&a, &b| objects[a].end_time.total_cmp(&objects[b].end_time));
        }

        // Age every active object and finalize the ones past their
        // fade-out window; the end-time sort makes them contiguous at the
        // head.
        let mut done = 0;
        for i in 0..self.processed.len() {
            let idx = self.processed[i];
            let object = &mut self.hit_objects[idx];
            object.update(time);

            if time >= object.lifetime_end() && object.finalize() {
                events.push(ChartEvent::Finalized {
                    number: object.number,
                });
                done += 1;
            }
        }
        if done > 0 {
            self.processed.drain(..done);
            self.finalized_count += done;
        }

        events
    }

    pub fn hit_objects(&self) -> &[HitObject] {
        &self.hit_objects
    }

    /// Objects not yet inside their preempt window, in chart order.
    pub fn pending(&self) -> impl Iterator<Item = &HitObject> {
        self.hit_objects[self.next_pending..].iter()
    }

    /// Objects inside their visible/judgeable window, ordered by end time.
    pub fn active(&self) -> impl Iterator<Item = &HitObject> {
        self.processed.iter().map(|&i| &self.hit_objects[i])
    }

    pub fn pending_count(&self) -> usize {
        self.hit_objects.len() - self.next_pending
    }

    pub fn active_count(&self) -> usize {
        self.processed.len()
    }

    pub fn finalized_count(&self) -> usize {
        self.finalized_count
    }

    /// Whether `time` falls inside a break section.
    pub fn in_break(&self, time: f64) -> bool {
        self.pauses.iter().any(|p| p.contains(time))
    }

    pub fn min_bpm(&self) -> f64 {
        self.timings.min_bpm()
    }

    pub fn max_bpm(&self) -> f64 {
        self.timings.max_bpm()
    }

    pub fn circle_count(&self) -> usize {
        self.count_kind(HitObjectKind::Circle)
    }

    pub fn slider_count(&self) -> usize {
        self.count_kind(HitObjectKind::Slider)
    }

    pub fn spinner_count(&self) -> usize {
        self.count_kind(HitObjectKind::Spinner)
    }

    fn count_kind(&self, kind: HitObjectKind) -> usize {
        self.hit_objects.iter().filter(|o| o.kind == kind).count()
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}
