use serde::{Deserialize, Serialize};

/// Effects bitmask: bit 0 enables kiai for the section.
const EFFECT_KIAI: u32 = 1 << 0;
/// Effects bitmask: bit 3 omits the first barline of the section.
const EFFECT_OMIT_FIRST_BARLINE: u32 = 1 << 3;

/// A single tempo/signature section of the chart.
///
/// Times are in milliseconds from the start of the audio. A point is active
/// from its `time` until the next point's `time` (or forever for the last
/// point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    /// Section start time in milliseconds.
    pub time: f64,
    /// Resolved beat length in milliseconds. For inherited points this is
    /// the base beat length scaled by the point's multiplier once
    /// `Timings::finalize_points` has run; before that it holds the raw
    /// (negative) value.
    pub beat_length: f64,
    /// Beat length of the governing uninherited point, unscaled.
    pub base_beat_length: f64,
    /// Beats per measure (4 unless the chart says otherwise).
    pub signature: i32,
    /// Default sample set for objects in this section (0 = chart default).
    pub sample_set: i32,
    /// Custom sample index (0 = default hitsounds).
    pub sample_index: i32,
    /// Sample volume as a 0.0–1.0 ratio.
    pub sample_volume: f64,
    /// Whether this point reuses the previous uninherited point's tempo
    /// with a local multiplier.
    pub inherited: bool,
    /// Kiai (visually emphasized) section flag.
    pub kiai: bool,
    /// Whether the first barline of this section is omitted.
    pub omit_first_bar_line: bool,
}

impl TimingPoint {
    /// Tempo of this section in beats per minute.
    pub fn bpm(&self) -> f64 {
        60_000.0 / self.beat_length
    }

    /// Velocity multiplier encoded in an inherited point's raw beat length
    /// (negative percentage convention, clamped to 0.1x–10x).
    pub(crate) fn multiplier_from_raw(raw: f64) -> f64 {
        if raw < 0.0 {
            (-raw).clamp(10.0, 1000.0) / 100.0
        } else {
            1.0
        }
    }
}

impl Default for TimingPoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            beat_length: crate::DEFAULT_BEAT_LENGTH,
            base_beat_length: crate::DEFAULT_BEAT_LENGTH,
            signature: 4,
            sample_set: 0,
            sample_index: 1,
            sample_volume: 1.0,
            inherited: false,
            kiai: false,
            omit_first_bar_line: false,
        }
    }
}

/// A raw timing-point record as handed over by the chart parser.
///
/// Field conventions follow the source data: `uninherited == 0` marks an
/// inherited point, `sample_volume` is a percentage, and `effects` is a
/// bitmask (bit 0 = kiai, bit 3 = omit first barline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPointRecord {
    pub time: f64,
    /// Raw beat length: milliseconds per beat for uninherited points, a
    /// negative multiplier percentage for inherited ones.
    pub beat_length: f64,
    #[serde(default = "default_signature")]
    pub signature: i32,
    #[serde(default)]
    pub sample_set: i32,
    #[serde(default = "default_sample_index")]
    pub sample_index: i32,
    /// Sample volume percentage (0–100).
    #[serde(default = "default_sample_volume")]
    pub sample_volume: i32,
    #[serde(default = "default_uninherited")]
    pub uninherited: i32,
    #[serde(default)]
    pub effects: u32,
}

fn default_signature() -> i32 {
    4
}

fn default_sample_index() -> i32 {
    1
}

fn default_sample_volume() -> i32 {
    100
}

fn default_uninherited() -> i32 {
    1
}

impl TimingPointRecord {
    pub fn inherited(&self) -> bool {
        self.uninherited == 0
    }

    pub fn kiai(&self) -> bool {
        self.effects & EFFECT_KIAI != 0
    }

    pub fn omit_first_bar_line(&self) -> bool {
        self.effects & EFFECT_OMIT_FIRST_BARLINE != 0
    }

    /// Sample volume as a 0.0–1.0 ratio.
    pub fn volume_ratio(&self) -> f64 {
        f64::from(self.sample_volume) / 100.0
    }
}

impl Default for TimingPointRecord {
    fn default() -> Self {
        Self {
            time: 0.0,
            beat_length: crate::DEFAULT_BEAT_LENGTH,
            signature: default_signature(),
            sample_set: 0,
            sample_index: default_sample_index(),
            sample_volume: default_sample_volume(),
            uninherited: default_uninherited(),
            effects: 0,
        }
    }
}
