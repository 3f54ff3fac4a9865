use std::time::Instant;

use crate::metrics::Metrics;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// One accepted keystroke in the visible buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Input {
    pub char: char,
    pub outcome: Outcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Idle,
    Active,
    Complete,
}

/// One attempt at a prompt.
///
/// Matching is byte-for-byte against the prompt, so only single-byte (ASCII)
/// input is meaningful. All lengths and indices are byte counts.
///
/// The keystroke counters record history: backspace shrinks `typed` but never
/// gives back a keystroke, so accuracy reflects every key pressed.
#[derive(Debug, Clone)]
pub struct Session {
    prompt: String,
    typed: Vec<Input>,
    started_at: Option<Instant>,
    last_keystroke_at: Option<Instant>,
    total_keystrokes: usize,
    correct_keystrokes: usize,
}

impl Session {
    pub fn new(prompt: String) -> Self {
        Self {
            prompt,
            typed: Vec::new(),
            started_at: None,
            last_keystroke_at: None,
            total_keystrokes: 0,
            correct_keystrokes: 0,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn typed(&self) -> &[Input] {
        &self.typed
    }

    pub fn total_keystrokes(&self) -> usize {
        self.total_keystrokes
    }

    pub fn correct_keystrokes(&self) -> usize {
        self.correct_keystrokes
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn last_keystroke_at(&self) -> Option<Instant> {
        self.last_keystroke_at
    }

    /// The prompt character at byte `idx`, if any.
    pub fn expected_char(&self, idx: usize) -> Option<char> {
        self.prompt.as_bytes().get(idx).map(|&b| b as char)
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.typed.len() == self.prompt.len()
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else if self.total_keystrokes == 0 {
            SessionState::Idle
        } else {
            SessionState::Active
        }
    }

    pub fn apply_keystroke(&mut self, ch: char) {
        self.apply_keystroke_at(ch, Instant::now());
    }

    /// Evaluate `ch` against the next expected prompt byte, stamping it `now`.
    ///
    /// Ignored once the prompt is complete, and for characters that do not
    /// fit in a single byte.
    pub fn apply_keystroke_at(&mut self, ch: char, now: Instant) {
        if self.is_complete() || !ch.is_ascii() {
            return;
        }

        let idx = self.typed.len();
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.last_keystroke_at = Some(now);
        self.total_keystrokes += 1;

        let outcome = if self.prompt.as_bytes()[idx] == ch as u8 {
            self.correct_keystrokes += 1;
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.typed.push(Input { char: ch, outcome });
    }

    /// Drop the last typed entry. Rejected on an empty buffer and once the
    /// buffer has reached the prompt length.
    pub fn backspace(&mut self) {
        if self.typed.is_empty() || self.typed.len() >= self.prompt.len() {
            return;
        }
        self.typed.pop();
    }

    pub fn reset(&mut self, new_prompt: String) {
        *self = Self::new(new_prompt);
    }

    pub fn elapsed_seconds(&self) -> f64 {
        match (self.started_at, self.last_keystroke_at) {
            (Some(start), Some(last)) => last.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    pub fn metrics_snapshot(&self) -> Metrics {
        Metrics::from_counts(
            self.correct_keystrokes,
            self.total_keystrokes,
            self.elapsed_seconds(),
            self.is_complete(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn type_str(session: &mut Session, s: &str) {
        for c in s.chars() {
            session.apply_keystroke(c);
        }
    }

    fn assert_invariants(session: &Session) {
        assert!(session.correct_keystrokes() <= session.total_keystrokes());
        assert!(session.typed().len() <= session.prompt().len());
        assert_eq!(session.has_started(), session.total_keystrokes() > 0);
    }

    #[test]
    fn test_session_new() {
        let session = Session::new("hello world".to_string());

        assert_eq!(session.prompt(), "hello world");
        assert!(session.typed().is_empty());
        assert_eq!(session.total_keystrokes(), 0);
        assert_eq!(session.correct_keystrokes(), 0);
        assert_eq!(session.started_at(), None);
        assert_eq!(session.last_keystroke_at(), None);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_expected_char() {
        let session = Session::new("hello".to_string());

        assert_eq!(session.expected_char(0), Some('h'));
        assert_eq!(session.expected_char(4), Some('o'));
        assert_eq!(session.expected_char(5), None);
    }

    #[test]
    fn test_write_correct_char() {
        let mut session = Session::new("test".to_string());

        session.apply_keystroke('t');

        assert_eq!(session.typed(), &[Input { char: 't', outcome: Outcome::Correct }]);
        assert_eq!(session.total_keystrokes(), 1);
        assert_eq!(session.correct_keystrokes(), 1);
        assert!(session.has_started());
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_write_incorrect_char() {
        let mut session = Session::new("test".to_string());

        session.apply_keystroke('x');

        assert_eq!(session.typed(), &[Input { char: 'x', outcome: Outcome::Incorrect }]);
        assert_eq!(session.total_keystrokes(), 1);
        assert_eq!(session.correct_keystrokes(), 0);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut session = Session::new("Ab".to_string());

        session.apply_keystroke('a');
        session.apply_keystroke('B');

        assert!(session.typed().iter().all(|i| i.outcome == Outcome::Incorrect));
        assert_eq!(session.correct_keystrokes(), 0);
    }

    #[test]
    fn first_keystroke_anchors_start_time() {
        let mut session = Session::new("abc".to_string());
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(250);

        session.apply_keystroke_at('a', t0);
        assert_eq!(session.started_at(), Some(t0));
        assert_eq!(session.last_keystroke_at(), Some(t0));
        assert_eq!(session.elapsed_seconds(), 0.0);

        session.apply_keystroke_at('x', t1);
        assert_eq!(session.started_at(), Some(t0));
        assert_eq!(session.last_keystroke_at(), Some(t1));
        assert_eq!(session.elapsed_seconds(), 0.25);
    }

    #[test]
    fn single_keystroke_has_zero_rates() {
        let mut session = Session::new("abc".to_string());
        session.apply_keystroke('a');

        let m = session.metrics_snapshot();
        assert_eq!(m.elapsed_seconds, 0.0);
        assert_eq!(m.words_per_minute, 0.0);
        assert_eq!(m.characters_per_minute, 0.0);
        assert_eq!(m.accuracy_percent, 100.0);
    }

    #[test]
    fn test_backspace() {
        let mut session = Session::new("test".to_string());

        type_str(&mut session, "te");
        session.backspace();
        assert_eq!(session.typed().len(), 1);

        session.backspace();
        assert!(session.typed().is_empty());
        assert_eq!(session.total_keystrokes(), 2);
        assert_eq!(session.correct_keystrokes(), 2);
        assert_invariants(&session);
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut session = Session::new("test".to_string());

        session.backspace();

        assert!(session.typed().is_empty());
        assert_eq!(session.total_keystrokes(), 0);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn backspace_after_completion_is_noop() {
        let mut session = Session::new("hi".to_string());
        type_str(&mut session, "hx");
        assert!(session.is_complete());

        session.backspace();

        assert_eq!(session.typed().len(), 2);
        assert!(session.is_complete());
    }

    #[test]
    fn keystrokes_after_completion_are_ignored() {
        let mut session = Session::new("hi".to_string());
        type_str(&mut session, "hi");
        let last = session.last_keystroke_at();
        let before = session.metrics_snapshot();

        type_str(&mut session, "more");

        assert_eq!(session.typed().len(), 2);
        assert_eq!(session.total_keystrokes(), 2);
        assert_eq!(session.last_keystroke_at(), last);
        assert_eq!(session.metrics_snapshot(), before);
    }

    #[test]
    fn non_ascii_keystrokes_are_ignored() {
        let mut session = Session::new("cafe".to_string());

        session.apply_keystroke('é');

        assert!(session.typed().is_empty());
        assert_eq!(session.total_keystrokes(), 0);
        assert!(!session.has_started());
    }

    #[test]
    fn multibyte_prompt_is_matched_bytewise() {
        // 'é' is two bytes; neither matches a single typed character
        let mut session = Session::new("é".to_string());
        assert_eq!(session.prompt().len(), 2);

        type_str(&mut session, "ee");

        assert!(session.is_complete());
        assert_eq!(session.correct_keystrokes(), 0);
    }

    #[test]
    fn empty_prompt_is_complete_immediately() {
        let mut session = Session::new(String::new());
        assert!(session.is_complete());
        assert_eq!(session.state(), SessionState::Complete);

        session.apply_keystroke('a');
        assert_eq!(session.total_keystrokes(), 0);
        assert_eq!(session.metrics_snapshot().elapsed_seconds, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new("abc".to_string());
        type_str(&mut session, "axc");
        assert!(session.is_complete());

        session.reset("new prompt".to_string());

        assert_eq!(session.prompt(), "new prompt");
        assert!(session.typed().is_empty());
        assert_eq!(session.total_keystrokes(), 0);
        assert_eq!(session.correct_keystrokes(), 0);
        assert_eq!(session.started_at(), None);
        assert_eq!(session.last_keystroke_at(), None);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.metrics_snapshot(), Metrics::default());
    }

    #[test]
    fn idle_metrics_are_zero() {
        let session = Session::new("anything".to_string());
        assert_eq!(session.metrics_snapshot(), Metrics::default());
    }

    #[test]
    fn snapshot_is_pure() {
        let mut session = Session::new("abc".to_string());
        type_str(&mut session, "ab");

        let first = session.metrics_snapshot();
        let second = session.metrics_snapshot();

        assert_eq!(first, second);
        assert_eq!(session.typed().len(), 2);
    }

    #[test]
    fn mistakes_count_history_not_buffer() {
        let mut session = Session::new("abc".to_string());

        session.apply_keystroke('x');
        session.backspace();
        session.apply_keystroke('y');
        session.backspace();

        let m = session.metrics_snapshot();
        assert!(session.typed().is_empty());
        assert_eq!(m.mistakes, 2);
        assert_eq!(m.accuracy_percent, 0.0);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn state_transitions() {
        let mut session = Session::new("ab".to_string());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.state().to_string(), "Idle");

        session.apply_keystroke('a');
        assert_eq!(session.state(), SessionState::Active);

        session.apply_keystroke('b');
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.state().to_string(), "Complete");
    }

    #[test]
    fn invariants_hold_through_mixed_input() {
        let mut session = Session::new("the quick fox".to_string());
        let script = "thx\u{8}e quixk\u{8}\u{8}ck fox!!";
        for c in script.chars() {
            if c == '\u{8}' {
                session.backspace();
            } else {
                session.apply_keystroke(c);
            }
            assert_invariants(&session);
        }
    }
}
