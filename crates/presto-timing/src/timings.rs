//! Timing timeline: ordered point sequence plus a forward-moving playback
//! cursor.
//!
//! Points are appended during chart load, then `finalize_points` sorts the
//! sequence and resolves inherited multipliers. During playback `update`
//! repositions the cursor with a forward scan; an explicit backward seek
//! falls back to rescanning from the start.

use crate::timing_point::{TimingPoint, TimingPointRecord};

#[derive(Debug, Clone)]
pub struct Timings {
    points: Vec<TimingPoint>,
    finalized: bool,

    cursor: usize,
    last_time: f64,

    min_bpm: f64,
    max_bpm: f64,

    default_point: TimingPoint,
}

impl Timings {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            finalized: false,
            cursor: 0,
            last_time: f64::NEG_INFINITY,
            min_bpm: f64::INFINITY,
            max_bpm: 0.0,
            default_point: TimingPoint::default(),
        }
    }

    /// Append a raw timing point.
    ///
    /// `beat_length` is the raw value from the chart: milliseconds per beat
    /// for an uninherited point, a negative multiplier percentage for an
    /// inherited one. A zero signature is coerced to 4/4. Raw values that
    /// are NaN, negative or zero are excluded from the min/max BPM range
    /// but the point is still stored (it still shapes rhythm timing).
    #[allow(clippy::too_many_arguments)]
    pub fn add_point(
        &mut self,
        time: f64,
        beat_length: f64,
        sample_set: i32,
        sample_index: i32,
        sample_volume: f64,
        signature: i32,
        inherited: bool,
        kiai: bool,
        omit_first_bar_line: bool,
    ) {
        if beat_length.is_finite() && beat_length > 0.0 {
            let bpm = 60_000.0 / beat_length;
            self.min_bpm = self.min_bpm.min(bpm);
            self.max_bpm = self.max_bpm.max(bpm);
        }

        let signature = if signature == 0 { 4 } else { signature };

        self.points.push(TimingPoint {
            time,
            beat_length,
            base_beat_length: beat_length,
            signature,
            sample_set,
            sample_index,
            sample_volume,
            inherited,
            kiai,
            omit_first_bar_line,
        });
        self.finalized = false;
    }

    /// Append a point from a raw parsed record, decoding the uninherited
    /// flag and the effects bitmask.
    pub fn add_record(&mut self, record: &TimingPointRecord) {
        self.add_point(
            record.time,
            record.beat_length,
            record.sample_set,
            record.sample_index,
            record.volume_ratio(),
            record.signature,
            record.inherited(),
            record.kiai(),
            record.omit_first_bar_line(),
        );
    }

    /// Sort points by time and resolve inherited multipliers into absolute
    /// beat lengths.
    pub fn finalize_points(&mut self) {
        self.points.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut base = crate::DEFAULT_BEAT_LENGTH;
        for point in &mut self.points {
            if point.inherited {
                let multiplier = TimingPoint::multiplier_from_raw(point.beat_length);
                point.base_beat_length = base;
                point.beat_length = base * multiplier;
            } else {
                base = point.beat_length;
                point.base_beat_length = base;
            }
        }

        self.finalized = true;
        self.reset();
    }

    /// Reposition the cursor to the point active at `time`.
    ///
    /// Moves forward-only across a monotonically advancing clock; a time
    /// earlier than the previous query restarts the scan from the front.
    pub fn update(&mut self, time: f64) {
        if time < self.last_time {
            self.cursor = 0;
        }
        while self.cursor + 1 < self.points.len() && self.points[self.cursor + 1].time <= time {
            self.cursor += 1;
        }
        self.last_time = time;
    }

    /// The point active at the last `update` time. Yields the first point
    /// when the query time precedes all points, and a default 4/4 point for
    /// an empty timeline.
    pub fn current(&self) -> &TimingPoint {
        self.points.get(self.cursor).unwrap_or(&self.default_point)
    }

    /// Stateless query: the point active at `time`, without moving the
    /// cursor.
    pub fn point_at(&self, time: f64) -> &TimingPoint {
        if self.points.is_empty() {
            return &self.default_point;
        }
        let idx = self.points.partition_point(|p| p.time <= time);
        &self.points[idx.saturating_sub(1)]
    }

    /// Stateless query: the uninherited point governing `time`, for
    /// beat-synchronised consumers.
    pub fn uninherited_point_at(&self, time: f64) -> &TimingPoint {
        let mut result: Option<&TimingPoint> = None;
        for point in &self.points {
            if point.inherited {
                continue;
            }
            if point.time <= time || result.is_none() {
                result = Some(point);
            }
            if point.time > time {
                break;
            }
        }
        result.unwrap_or(&self.default_point)
    }

    /// Rewind the cursor to the start of the timeline.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.last_time = f64::NEG_INFINITY;
    }

    pub fn points(&self) -> &[TimingPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether `finalize_points` has run since the last append.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Smallest BPM among valid uninherited points (infinity if none).
    pub fn min_bpm(&self) -> f64 {
        self.min_bpm
    }

    /// Largest BPM among valid uninherited points (0 if none).
    pub fn max_bpm(&self) -> f64 {
        self.max_bpm
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uninherited(timings: &mut Timings, time: f64, beat_length: f64) {
        timings.add_point(time, beat_length, 0, 1, 1.0, 4, false, false, false);
    }

    #[test]
    fn bpm_range_skips_nan_and_negative() {
        let mut timings = Timings::new();
        uninherited(&mut timings, 0.0, 500.0); // 120 BPM
        uninherited(&mut timings, 1000.0, 60_000.0 / 180.0); // 180 BPM
        timings.add_point(2000.0, f64::NAN, 0, 1, 1.0, 4, false, false, false);
        timings.add_point(3000.0, -50.0, 0, 1, 1.0, 4, true, false, false);
        timings.finalize_points();

        assert!((timings.min_bpm() - 120.0).abs() < 1e-9);
        assert!((timings.max_bpm() - 180.0).abs() < 1e-9);
        // Excluded points are still stored.
        assert_eq!(timings.points().len(), 4);
    }

    #[test]
    fn query_between_points_returns_previous() {
        let mut timings = Timings::new();
        uninherited(&mut timings, 0.0, 500.0);
        uninherited(&mut timings, 1000.0, 400.0);
        uninherited(&mut timings, 2000.0, 300.0);
        timings.finalize_points();

        timings.update(1500.0);
        assert_eq!(timings.current().time, 1000.0);
        assert_eq!(timings.point_at(1500.0).time, 1000.0);
    }

    #[test]
    fn query_before_first_point_returns_first() {
        let mut timings = Timings::new();
        uninherited(&mut timings, 500.0, 500.0);
        timings.finalize_points();

        timings.update(100.0);
        assert_eq!(timings.current().time, 500.0);
        assert_eq!(timings.point_at(0.0).time, 500.0);
    }

    #[test]
    fn cursor_survives_backward_seek() {
        let mut timings = Timings::new();
        for i in 0..10 {
            uninherited(&mut timings, f64::from(i) * 1000.0, 500.0);
        }
        timings.finalize_points();

        timings.update(9500.0);
        assert_eq!(timings.current().time, 9000.0);

        timings.update(2500.0);
        assert_eq!(timings.current().time, 2000.0);

        timings.update(2600.0);
        assert_eq!(timings.current().time, 2000.0);
    }

    #[test]
    fn inherited_points_resolve_against_base() {
        let mut timings = Timings::new();
        uninherited(&mut timings, 0.0, 500.0);
        // Out-of-order append: finalize must sort before resolving.
        timings.add_point(3000.0, -50.0, 0, 1, 1.0, 4, true, false, false);
        uninherited(&mut timings, 2000.0, 400.0);
        timings.finalize_points();

        let points = timings.points();
        assert_eq!(points[0].time, 0.0);
        assert_eq!(points[1].time, 2000.0);
        assert_eq!(points[2].time, 3000.0);
        assert!(points[2].inherited);
        assert!((points[2].base_beat_length - 400.0).abs() < 1e-9);
        assert!((points[2].beat_length - 200.0).abs() < 1e-9);
    }

    #[test]
    fn zero_signature_coerced_to_common_time() {
        let mut timings = Timings::new();
        timings.add_point(0.0, 500.0, 0, 1, 1.0, 0, false, false, false);
        timings.finalize_points();
        assert_eq!(timings.current().signature, 4);
    }

    #[test]
    fn record_decoding_roundtrip() {
        let mut timings = Timings::new();
        timings.add_record(&TimingPointRecord {
            time: 0.0,
            beat_length: 500.0,
            signature: 3,
            sample_set: 2,
            sample_index: 5,
            sample_volume: 80,
            uninherited: 1,
            effects: 0b1001,
        });
        timings.finalize_points();

        let point = timings.current();
        assert_eq!(point.signature, 3);
        assert_eq!(point.sample_set, 2);
        assert_eq!(point.sample_index, 5);
        assert!((point.sample_volume - 0.8).abs() < 1e-9);
        assert!(point.kiai);
        assert!(point.omit_first_bar_line);
        assert!(!point.inherited);
    }

    #[test]
    fn empty_timeline_yields_default_point() {
        let mut timings = Timings::new();
        timings.finalize_points();
        timings.update(1234.0);
        assert_eq!(timings.current().signature, 4);
        assert!((timings.current().beat_length - crate::DEFAULT_BEAT_LENGTH).abs() < 1e-9);
    }

    #[test]
    fn uninherited_query_skips_inherited() {
        let mut timings = Timings::new();
        uninherited(&mut timings, 0.0, 500.0);
        timings.add_point(1000.0, -50.0, 0, 1, 1.0, 4, true, false, false);
        uninherited(&mut timings, 2000.0, 400.0);
        timings.finalize_points();

        assert_eq!(timings.uninherited_point_at(1500.0).time, 0.0);
        assert_eq!(timings.uninherited_point_at(2500.0).time, 2000.0);
    }
}
