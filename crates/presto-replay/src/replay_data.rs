//! Replay data with a compressed input-event payload.
//!
//! Events travel as 9-byte binary records, gzip-compressed and Base64
//! URL-safe encoded inside the JSON body, so long charts stay compact on
//! disk.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use presto_chart::Mods;

use crate::input_event::InputEvent;

/// A recorded (or synthesized) play for one cursor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReplayData {
    /// Player name.
    #[serde(default)]
    pub player: String,
    /// MD5 of the chart the replay belongs to.
    #[serde(default)]
    pub chart_md5: String,
    /// Modifier set the cursor played with.
    #[serde(default)]
    pub mods: Mods,
    /// Recording date (unix timestamp, seconds).
    #[serde(default)]
    pub date: i64,
    /// Input events (populated after `validate()`).
    #[serde(default)]
    pub events: Vec<InputEvent>,
    /// Compressed event data (Base64 URL-safe encoded gzip). Populated by
    /// `shrink()`, cleared by `validate()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl ReplayData {
    /// Compress `events` into the Base64 payload and clear the event list.
    pub fn shrink(&mut self) {
        if self.events.is_empty() {
            return;
        }

        let mut raw = Vec::with_capacity(self.events.len() * 9);
        for event in &self.events {
            event.encode(&mut raw);
        }

        let mut gzip_buf = Vec::new();
        let mut encoder = GzEncoder::new(&mut gzip_buf, Compression::default());
        // Writing to an in-memory buffer cannot fail.
        encoder.write_all(&raw).unwrap();
        encoder.finish().unwrap();

        self.payload = Some(URL_SAFE.encode(&gzip_buf));
        self.events.clear();
    }

    /// Decompress the payload back into `events`, dropping malformed
    /// records. Returns `true` if any events are present afterwards.
    pub fn validate(&mut self) -> bool {
        if let Some(ref payload) = self.payload
            && let Ok(gzip_data) = URL_SAFE.decode(payload)
        {
            let mut decoder = GzDecoder::new(&gzip_data[..]);
            let mut raw = Vec::new();
            if decoder.read_to_end(&mut raw).is_ok() {
                let mut events = Vec::with_capacity(raw.len() / 9);
                let mut pos = 0;
                while pos + 9 <= raw.len() {
                    let record: [u8; 9] = raw[pos..pos + 9].try_into().unwrap();
                    if let Some(event) = InputEvent::decode(&record) {
                        events.push(event);
                    }
                    pos += 9;
                }
                self.events = events;
            }
            self.payload = None;
        }
        !self.events.is_empty()
    }

    /// Write as JSON, shrinking the event list first.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut data = self.clone();
        data.shrink();
        let json = serde_json::to_vec_pretty(&data)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write replay {}", path.display()))?;
        Ok(())
    }

    /// Read from JSON and expand the event payload.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read replay {}", path.display()))?;
        let mut data: Self = serde_json::from_slice(&bytes)?;
        data.validate();
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presto_input::CursorButton;

    fn sample_events() -> Vec<InputEvent> {
        vec![
            InputEvent::new(0.0, CursorButton::LeftKey, true),
            InputEvent::new(48.0, CursorButton::LeftKey, false),
            InputEvent::new(100.0, CursorButton::RightKey, true),
            InputEvent::new(150.5, CursorButton::RightKey, false),
            InputEvent::new(200.0, CursorButton::LeftMouse, true),
        ]
    }

    #[test]
    fn shrink_validate_round_trip() {
        let mut data = ReplayData {
            player: "auto".into(),
            events: sample_events(),
            ..Default::default()
        };

        data.shrink();
        assert!(data.events.is_empty());
        assert!(data.payload.is_some());

        assert!(data.validate());
        assert!(data.payload.is_none());
        assert_eq!(data.events, sample_events());
    }

    #[test]
    fn shrink_on_empty_is_a_noop() {
        let mut data = ReplayData::default();
        data.shrink();
        assert!(data.payload.is_none());
        assert!(!data.validate());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.json");

        let data = ReplayData {
            player: "auto".into(),
            chart_md5: "d41d8cd98f00b204e9800998ecf8427e".into(),
            mods: Mods::HARD_ROCK | Mods::PRECISE,
            date: 1_700_000_000,
            events: sample_events(),
            payload: None,
        };
        data.save(&path).unwrap();

        let loaded = ReplayData::load(&path).unwrap();
        assert_eq!(loaded.player, "auto");
        assert_eq!(loaded.chart_md5, data.chart_md5);
        assert_eq!(loaded.mods, data.mods);
        assert_eq!(loaded.date, data.date);
        assert_eq!(loaded.events, sample_events());
        assert!(loaded.payload.is_none());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = ReplayData::load(Path::new("/nonexistent/replay.json")).unwrap_err();
        assert!(err.to_string().contains("replay.json"));
    }
}
