use presto_chart::HitObjectKind;

/// Live hit state of one currently judgeable object, as reported by a
/// scoring ruleset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveObjectState {
    /// Chart index of the object.
    pub number: usize,
    pub kind: HitObjectKind,
    /// The object's start time in milliseconds.
    pub start_time: f64,
    /// Whether the object's press has landed: circle hit, or slider start
    /// hit. Meaningless for spinners.
    pub start_hit: bool,
}

/// Query seam onto the external scoring ruleset's live judgement state,
/// scoped to one cursor.
pub trait JudgementSource {
    /// Objects currently inside their judgeable window, with press state.
    fn active_objects(&self) -> Vec<ActiveObjectState>;
}
