//! Judgement-driven input synthesizer.
//!
//! Reacts to live hit-test state instead of the raw object timeline: a
//! frame clicks when any un-hit circle or un-start-hit slider has passed
//! its activation threshold, alternating the left and right channel on
//! every clicking frame.

use presto_chart::{HitObjectKind, Mods};

use crate::cursor::VirtualCursor;
use crate::judgement::JudgementSource;

/// Activation leniency before an object's start time, in milliseconds.
const STABLE_LENIENCY: f64 = 12.0;
/// Tighter leniency used when the cursor plays with `Mods::PRECISE`.
const PRECISE_LENIENCY: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct RelaxInputProcessor {
    precise: bool,
    was_left: bool,
}

impl RelaxInputProcessor {
    /// The leniency mode is fixed per cursor by its modifier set.
    pub fn new(mods: Mods) -> Self {
        Self {
            precise: mods.contains(Mods::PRECISE),
            was_left: false,
        }
    }

    /// Advance to `time`, querying the ruleset's live state for this
    /// cursor.
    ///
    /// A click is a single-frame pulse; release timing is left to the
    /// cursor consumer.
    pub fn update(
        &mut self,
        time: f64,
        source: &dyn JudgementSource,
        cursor: &mut VirtualCursor,
    ) {
        let leniency = if self.precise {
            PRECISE_LENIENCY
        } else {
            STABLE_LENIENCY
        };

        let mut click = false;
        for object in source.active_objects() {
            let awaiting_press = match object.kind {
                HitObjectKind::Circle | HitObjectKind::Slider => !object.start_hit,
                HitObjectKind::Spinner => false,
            };
            if awaiting_press && time >= object.start_time - leniency {
                click = true;
            }
        }

        cursor.left_key = click && !self.was_left;
        cursor.right_key = click && self.was_left;

        if click {
            self.was_left = !self.was_left;
        }
    }
}
