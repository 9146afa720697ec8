// Playback session: one chart, N simulated cursors, per-cursor input
// synthesis and replay capture

mod config;
mod session;

pub use config::{InputMode, PlayerConfig, SessionConfig};
pub use session::PlaybackSession;
