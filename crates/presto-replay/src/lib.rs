// Synthesized-input recording: event log, per-frame recorder, replay files

mod input_event;
mod recorder;
mod replay_data;

pub use input_event::InputEvent;
pub use recorder::InputRecorder;
pub use replay_data::ReplayData;
