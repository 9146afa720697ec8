//! Time-driven input synthesizer.
//!
//! Walks a chart-ordered copy of the object spans and drives the cursor's
//! four channels in a round-robin of period 4 (left key, right key, left
//! mouse, right mouse), so consecutive objects alternate between key-based
//! and mouse-based activation with realistic release delays.

use presto_chart::HitObject;

use crate::cursor::VirtualCursor;

/// How long a button stays held past an object's end, in milliseconds.
const KEY_RELEASE_DELAY: f64 = 50.0;
/// Minimum hold past an object's end when the next press is close.
const MIN_HOLD: f64 = 1.0;
/// Gap kept before the next press so close objects never overlap on one
/// channel.
const OVERLAP_GUARD: f64 = 2.0;
/// Idle time past the last started object's end after which every channel
/// is forced released.
const IDLE_RELEASE: f64 = 100.0;

/// Ring value meaning "released long ago".
const NEVER: f64 = -1.0e7;

#[derive(Debug, Clone, Copy)]
struct Span {
    start_time: f64,
    end_time: f64,
}

/// Synthesizes press/release input timed to object starts and ends,
/// independent of hit success.
#[derive(Debug, Clone)]
pub struct NaturalInputProcessor {
    queue: Vec<Span>,
    head: usize,

    last_time: f64,
    /// Objects started so far; the ring slot of object `n` is `n % 4` and
    /// the output phase follows the last started object.
    started: usize,
    previous_end: f64,
    /// Absolute release time per channel slot.
    release_at: [f64; 4],
}

impl NaturalInputProcessor {
    pub fn new(objects: &[HitObject]) -> Self {
        Self {
            queue: objects
                .iter()
                .map(|o| Span {
                    start_time: o.start_time,
                    end_time: o.end_time,
                })
                .collect(),
            head: 0,
            last_time: f64::NEG_INFINITY,
            started: 0,
            previous_end: f64::NEG_INFINITY,
            release_at: [NEVER; 4],
        }
    }

    /// Advance to `time` and write the four channel states into `cursor`.
    pub fn update(&mut self, time: f64, cursor: &mut VirtualCursor) {
        // Consume every span whose start has been reached. A coarse frame
        // can cross several objects at once; each crossing registers a
        // press in its ring slot.
        while self.head < self.queue.len() && self.queue[self.head].start_time <= time {
            let span = self.queue[self.head];

            if self.last_time < span.start_time {
                let mut release_at = span.end_time + KEY_RELEASE_DELAY;

                if self.head + 1 < self.queue.len() {
                    // The press on this channel must clear before the press
                    // two slots ahead (the same round-robin phase offset),
                    // clamped to the queue end.
                    let look = (self.head + 2).min(self.queue.len() - 1);
                    let next_start = self.queue[look].start_time;
                    release_at = (next_start - OVERLAP_GUARD)
                        .clamp(span.end_time + MIN_HOLD, span.end_time + KEY_RELEASE_DELAY);
                }

                self.release_at[self.started % 4] = release_at;
                self.previous_end = span.end_time;
                self.started += 1;
            }

            self.head += 1;
        }
        self.last_time = time;

        // Derive the channel states from the phase of the last started
        // object: its own channel holds, and channels with a pending
        // release re-assert to reproduce overlapping presses.
        if self.started > 0 {
            match (self.started - 1) % 4 {
                0 => {
                    cursor.left_key = true;
                    cursor.right_key = false;
                    cursor.left_mouse = time < self.release_at[2];
                    cursor.right_mouse = time < self.release_at[3];
                }
                1 => {
                    cursor.left_key = time < self.release_at[0];
                    cursor.right_key = true;
                    cursor.left_mouse = false;
                    cursor.right_mouse = false;
                }
                2 => {
                    cursor.left_key = false;
                    cursor.right_key = time < self.release_at[1];
                    cursor.left_mouse = true;
                    cursor.right_mouse = false;
                }
                _ => {
                    cursor.left_key = false;
                    cursor.right_key = time < self.release_at[1];
                    cursor.left_mouse = time < self.release_at[2];
                    cursor.right_mouse = true;
                }
            }
        }

        // Idle cutoff: nothing stays stuck after the last object of a
        // chart or across long breaks.
        if time - self.previous_end > IDLE_RELEASE {
            cursor.release_all();
        }
    }

    /// Number of objects whose press has been synthesized.
    pub fn started_count(&self) -> usize {
        self.started
    }

    /// Objects still ahead of the playback position.
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.head
    }
}
