/// Rolling window for the keys-per-second readout, in milliseconds.
const KPS_WINDOW: f64 = 1000.0;

/// Counts key presses inside a rolling one-second window.
#[derive(Debug, Clone, Default)]
pub struct KpsCounter {
    hits: Vec<f64>,
    value: usize,
}

impl KpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press at `time`.
    pub fn add(&mut self, time: f64) {
        self.hits.push(time);
    }

    /// Drop presses older than the window and refresh the count.
    pub fn update(&mut self, time: f64) {
        self.hits.retain(|&hit| time - hit <= KPS_WINDOW);
        self.value = self.hits.len();
    }

    pub fn value(&self) -> usize {
        self.value
    }
}
