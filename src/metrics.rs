/// Characters per "word" in the words-per-minute convention.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Read-only statistics derived from a typing session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub elapsed_seconds: f64,
    pub words_per_minute: f64,
    pub characters_per_minute: f64,
    pub accuracy_percent: f64,
    pub mistakes: usize,
    pub is_complete: bool,
}

impl Metrics {
    pub fn from_counts(
        correct: usize,
        total: usize,
        elapsed_seconds: f64,
        is_complete: bool,
    ) -> Self {
        Self {
            elapsed_seconds,
            words_per_minute: words_per_minute(correct, elapsed_seconds),
            characters_per_minute: characters_per_minute(correct, elapsed_seconds),
            accuracy_percent: accuracy(correct, total),
            mistakes: total.saturating_sub(correct),
            is_complete,
        }
    }
}

pub fn words_per_minute(correct: usize, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds <= 0.0 {
        return 0.0;
    }
    (correct as f64 / CHARS_PER_WORD) / (elapsed_seconds / 60.0)
}

pub fn characters_per_minute(correct: usize, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds <= 0.0 {
        return 0.0;
    }
    (correct as f64 / elapsed_seconds) * 60.0
}

/// Zero, not 100, when nothing has been typed yet.
pub fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64) * 100.0
}
