//! Playback session: drives one chart and any number of simulated
//! cursors, each owned by exactly one input synthesizer.
//!
//! Per frame the session advances the chart scheduler once, then every
//! player's synthesizer writes its cursor, the recorder diffs the channel
//! states and the KPS window updates. Relax players read their entry in
//! the per-player judgement-source slice supplied by the external ruleset.

use presto_chart::{Chart, ChartEvent, Mods};
use presto_input::{
    JudgementSource, KpsCounter, NaturalInputProcessor, RelaxInputProcessor, VirtualCursor,
};
use presto_replay::{InputRecorder, ReplayData};

use crate::config::{InputMode, PlayerConfig, SessionConfig};

#[derive(Debug, Clone)]
enum Synthesizer {
    Natural(NaturalInputProcessor),
    Relax(RelaxInputProcessor),
}

#[derive(Debug, Clone)]
struct Player {
    name: String,
    mode: InputMode,
    mods: Mods,
    record: bool,

    cursor: VirtualCursor,
    synthesizer: Synthesizer,
    recorder: InputRecorder,
    kps: KpsCounter,
}

impl Player {
    fn new(config: PlayerConfig, chart: &Chart) -> Self {
        let synthesizer = match config.mode {
            InputMode::Natural => {
                Synthesizer::Natural(NaturalInputProcessor::new(chart.hit_objects()))
            }
            InputMode::Relax => Synthesizer::Relax(RelaxInputProcessor::new(config.mods)),
        };
        Self {
            name: config.name,
            mode: config.mode,
            mods: config.mods,
            record: config.record,
            cursor: VirtualCursor::new(),
            synthesizer,
            recorder: InputRecorder::new(),
            kps: KpsCounter::new(),
        }
    }
}

pub struct PlaybackSession {
    chart: Chart,
    players: Vec<Player>,
}

impl PlaybackSession {
    /// Build a session from an explicit configuration. The player list is
    /// capped at `max_players`; the automated player, if requested, is
    /// appended before capping.
    pub fn new(mut chart: Chart, config: &SessionConfig) -> Self {
        chart.reset();

        let mut player_configs = config.players.clone();
        if config.include_auto {
            player_configs.push(PlayerConfig::natural(config.auto_name.clone()));
        }
        if player_configs.len() > config.max_players {
            log::warn!(
                "session limited to {} players, dropping {}",
                config.max_players,
                player_configs.len() - config.max_players
            );
            player_configs.truncate(config.max_players);
        }

        let players = player_configs
            .into_iter()
            .map(|c| Player::new(c, &chart))
            .collect();

        Self { chart, players }
    }

    /// Advance the whole session to `time`.
    ///
    /// `judgements` carries one optional judgement source per player (in
    /// player order) for relax cursors; natural players ignore their
    /// entry. A relax player with no source keeps its cursor released.
    pub fn update(
        &mut self,
        time: f64,
        judgements: &[Option<&dyn JudgementSource>],
    ) -> Vec<ChartEvent> {
        let events = self.chart.update(time);

        for (i, player) in self.players.iter_mut().enumerate() {
            match &mut player.synthesizer {
                Synthesizer::Natural(processor) => processor.update(time, &mut player.cursor),
                Synthesizer::Relax(processor) => {
                    match judgements.get(i).copied().flatten() {
                        Some(source) => processor.update(time, source, &mut player.cursor),
                        None => player.cursor.release_all(),
                    }
                }
            }

            let presses = player.recorder.record(time, &player.cursor);
            for _ in 0..presses {
                player.kps.add(time);
            }
            player.kps.update(time);

            if !player.record {
                player.recorder.clear_events();
            }
        }

        events
    }

    /// Restore the initial partition and fresh per-player state, as after
    /// an explicit seek.
    pub fn reset(&mut self) {
        self.chart.reset();

        let chart = &self.chart;
        for player in &mut self.players {
            player.cursor.release_all();
            player.recorder.reset();
            player.kps = KpsCounter::new();
            player.synthesizer = match player.mode {
                InputMode::Natural => {
                    Synthesizer::Natural(NaturalInputProcessor::new(chart.hit_objects()))
                }
                InputMode::Relax => Synthesizer::Relax(RelaxInputProcessor::new(player.mods)),
            };
        }
    }

    /// Take the recorded input stream of a recording player as replay
    /// data. The caller stamps the date.
    pub fn take_replay(&mut self, player: usize) -> Option<ReplayData> {
        let chart_md5 = self.chart.md5.clone();
        let p = self.players.get_mut(player)?;
        if !p.record {
            return None;
        }
        Some(ReplayData {
            player: p.name.clone(),
            chart_md5,
            mods: p.mods,
            date: 0,
            events: p.recorder.take_events(),
            payload: None,
        })
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Mutable chart access for mod/difficulty changes; call `reset`
    /// afterwards.
    pub fn chart_mut(&mut self) -> &mut Chart {
        &mut self.chart
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_name(&self, player: usize) -> Option<&str> {
        self.players.get(player).map(|p| p.name.as_str())
    }

    pub fn cursor(&self, player: usize) -> Option<&VirtualCursor> {
        self.players.get(player).map(|p| &p.cursor)
    }

    /// Keys-per-second readout for one player.
    pub fn kps(&self, player: usize) -> Option<usize> {
        self.players.get(player).map(|p| p.kps.value())
    }
}
