// Tempo/signature timeline: timing points, playback cursor, BPM aggregation

mod timing_point;
mod timings;

pub use timing_point::{TimingPoint, TimingPointRecord};
pub use timings::Timings;

/// Beat length used when a chart provides no uninherited timing point
/// (500 ms per beat = 120 BPM).
pub const DEFAULT_BEAT_LENGTH: f64 = 500.0;
