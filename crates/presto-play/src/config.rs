use presto_chart::Mods;
use serde::{Deserialize, Serialize};

/// Which synthesizer drives a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Time-driven presser following the object timeline.
    #[default]
    Natural,
    /// Judgement-driven presser reacting to live hit state.
    Relax,
}

/// One simulated player in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub mode: InputMode,
    #[serde(default)]
    pub mods: Mods,
    /// Whether the synthesized input stream is kept for replay export.
    #[serde(default)]
    pub record: bool,
}

impl PlayerConfig {
    pub fn natural(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: InputMode::Natural,
            mods: Mods::empty(),
            record: false,
        }
    }

    pub fn relax(name: impl Into<String>, mods: Mods) -> Self {
        Self {
            name: name.into(),
            mode: InputMode::Relax,
            mods,
            record: false,
        }
    }
}

/// Explicit session configuration, passed into the constructor of any
/// session rather than read from ambient settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub players: Vec<PlayerConfig>,
    /// Hard cap on simulated players; extra entries are dropped.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
    /// Append an automated natural player after the configured list.
    #[serde(default)]
    pub include_auto: bool,
    #[serde(default = "default_auto_name")]
    pub auto_name: String,
}

fn default_max_players() -> usize {
    50
}

fn default_auto_name() -> String {
    "auto".to_owned()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            max_players: default_max_players(),
            include_auto: false,
            auto_name: default_auto_name(),
        }
    }
}
