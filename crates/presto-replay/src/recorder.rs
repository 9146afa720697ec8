use presto_input::{CursorButton, VirtualCursor};

use crate::input_event::InputEvent;

/// Diffs a virtual cursor's channel states frame by frame into an event
/// stream.
#[derive(Debug, Clone, Default)]
pub struct InputRecorder {
    last: [bool; 4],
    events: Vec<InputEvent>,
}

impl InputRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the cursor at `time`. Emits one event per channel
    /// transition and returns how many channels went down this frame.
    pub fn record(&mut self, time: f64, cursor: &VirtualCursor) -> usize {
        let mut presses = 0;
        for (i, button) in CursorButton::ALL.into_iter().enumerate() {
            let state = cursor.is_pressed(button);
            if state != self.last[i] {
                self.events.push(InputEvent::new(time, button, state));
                if state {
                    presses += 1;
                }
                self.last[i] = state;
            }
        }
        presses
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<InputEvent> {
        self.last = [false; 4];
        std::mem::take(&mut self.events)
    }

    /// Drop buffered events without disturbing the channel-state memory,
    /// for consumers that only need the press count.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn reset(&mut self) {
        self.last = [false; 4];
        self.events.clear();
    }
}
