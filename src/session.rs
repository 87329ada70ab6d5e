use crate::clock::SessionClock;
use std::collections::HashSet;

/// Elapsed time below this is too noisy for a wpm figure.
const MIN_ELAPSED_SECS: f64 = 0.1;

/// Characters-per-word normalization used by the wpm formula.
const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No character typed yet; the clock has not started.
    Idle,
    /// First character seen; the clock is counting down.
    Running,
    /// Clock expired. Terminal state, no further buffer mutation.
    TimedOut,
}

/// Per-index classification of the ghost text for rendering. The
/// presentation layer sees only this plus the metrics accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Typed character matches the ghost character.
    Matched,
    /// Typed character differs; carries what was actually typed.
    Mismatched(char),
    /// A skip-inserted space sitting over a non-space ghost character.
    SkippedSpace,
    /// The next character to type.
    Cursor,
    /// Not yet reached.
    Untyped,
}

/// A typing session being displayed to the user: the ghost text, what has
/// been typed against it, and the derived wpm/accuracy figures.
///
/// The ghost buffer is owned here and mutated only through the input
/// processor (elongation and backspace-merge); the ui reads it via
/// [`Session::cells`].
#[derive(Debug)]
pub struct Session {
    pub ghost: Vec<char>,
    pub typed: Vec<char>,
    pub cursor: usize,
    pub phase: Phase,
    pub clock: SessionClock,
    /// Indices that were ever mistyped. Append-only for the session;
    /// overwriting with a correct character does not clear an entry.
    pub errors: HashSet<usize>,
    /// Furthest typed length reached; accuracy snapshots only advance
    /// past this high-water mark.
    pub max_typed: usize,
    pub wpm: u64,
    pub accuracy: f64,
}

impl Session {
    pub fn new(ghost_text: &str, number_of_secs: f64) -> Self {
        Self {
            ghost: ghost_text.chars().collect(),
            typed: vec![],
            cursor: 0,
            phase: Phase::Idle,
            clock: SessionClock::new(number_of_secs),
            errors: HashSet::new(),
            max_typed: 0,
            wpm: 0,
            accuracy: 100.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn has_timed_out(&self) -> bool {
        self.phase == Phase::TimedOut
    }

    /// Transition Idle -> Running. The first real character keystroke
    /// calls this; space and backspace never start the clock.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
        }
    }

    /// Advance the clock by one tick interval and refresh wpm. On the
    /// tick that exhausts the clock the session freezes: phase moves to
    /// TimedOut and wpm/accuracy keep their last computed values.
    pub fn on_tick(&mut self, interval_ms: u64) {
        if self.phase != Phase::Running {
            return;
        }

        self.clock.tick(interval_ms);

        let elapsed = self.clock.elapsed_secs();
        if elapsed >= MIN_ELAPSED_SECS {
            let words = self.typed.len() as f64 / CHARS_PER_WORD;
            self.wpm = (words * (60.0 / elapsed)).floor() as u64;
        }

        if self.clock.timed_out() {
            self.phase = Phase::TimedOut;
        }
    }

    /// Re-mark mismatched positions and, when new ground has been typed,
    /// take a fresh accuracy snapshot. Marking is idempotent; retyping
    /// over already-visited positions changes nothing until the typed
    /// length passes its previous high-water mark.
    pub fn recompute_accuracy(&mut self) {
        for (idx, (&typed, &ghost)) in self.typed.iter().zip(self.ghost.iter()).enumerate() {
            if typed != ghost {
                self.errors.insert(idx);
            }
        }

        if self.typed.len() > self.max_typed {
            self.max_typed = self.typed.len();
            let correct = self.typed.len() - self.errors.len();
            self.accuracy = (correct as f64 / self.typed.len() as f64) * 100.0;
        }
    }

    /// Snapshot of the ghost text for rendering, one state per index.
    pub fn cells(&self) -> Vec<CellState> {
        self.ghost
            .iter()
            .enumerate()
            .map(|(idx, &ghost)| {
                if idx < self.typed.len() {
                    let typed = self.typed[idx];
                    if typed == ghost {
                        CellState::Matched
                    } else if typed == ' ' {
                        CellState::SkippedSpace
                    } else {
                        CellState::Mismatched(typed)
                    }
                } else if idx == self.cursor {
                    CellState::Cursor
                } else {
                    CellState::Untyped
                }
            })
            .collect()
    }

    pub fn ghost_text(&self) -> String {
        self.ghost.iter().collect()
    }

    pub fn typed_text(&self) -> String {
        self.typed.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn new_session_is_idle_with_clean_metrics() {
        let session = Session::new("cat dog", 30.0);

        assert_eq!(session.phase, Phase::Idle);
        assert_eq!(session.cursor, 0);
        assert_eq!(session.wpm, 0);
        assert_eq!(session.accuracy, 100.0);
        assert!(session.errors.is_empty());
    }

    #[test]
    fn start_moves_idle_to_running_once() {
        let mut session = Session::new("cat", 30.0);
        session.start();
        assert_eq!(session.phase, Phase::Running);

        session.phase = Phase::TimedOut;
        session.start();
        assert_eq!(session.phase, Phase::TimedOut);
    }

    #[test]
    fn tick_is_ignored_while_idle() {
        let mut session = Session::new("cat", 1.0);
        session.on_tick(100);
        assert_eq!(session.clock.remaining_secs(), 1.0);
        assert_eq!(session.phase, Phase::Idle);
    }

    #[test]
    fn wpm_stays_zero_below_minimum_elapsed() {
        let mut session = Session::new("cat dog bird", 30.0);
        session.start();
        session.typed = "cat".chars().collect();
        session.cursor = 3;

        session.on_tick(50);
        assert_eq!(session.wpm, 0);

        session.on_tick(100);
        assert!(session.wpm > 0);
    }

    #[test]
    fn wpm_counts_all_typed_characters() {
        // 10 chars in 0.7s: (10/5) * (60/0.7) = 171.42... -> 171
        let mut session = Session::new("aaaaa aaaaa aaaaa", 30.0);
        session.start();
        session.typed = vec!['a'; 10];
        session.cursor = 10;

        for _ in 0..7 {
            session.on_tick(100);
        }
        assert_eq!(session.wpm, 171);
    }

    #[test]
    fn session_freezes_on_the_tick_that_exhausts_the_clock() {
        let mut session = Session::new("cat", 0.2);
        session.start();
        session.on_tick(100);
        assert_eq!(session.phase, Phase::Running);
        session.on_tick(100);
        assert_eq!(session.phase, Phase::TimedOut);

        let frozen_wpm = session.wpm;
        session.on_tick(100);
        assert_eq!(session.wpm, frozen_wpm);
        assert_eq!(session.clock.remaining_secs(), 0.0);
    }

    #[test]
    fn accuracy_marks_mismatches_and_snapshots_on_new_ground() {
        let mut session = Session::new("cat", 30.0);
        session.start();
        session.typed = "cx".chars().collect();
        session.cursor = 2;
        session.recompute_accuracy();

        assert!(session.errors.contains(&1));
        assert_eq!(session.accuracy, 50.0);
    }

    #[test]
    fn error_marking_is_idempotent() {
        let mut session = Session::new("cat", 30.0);
        session.start();
        session.typed = "cxt".chars().collect();
        session.cursor = 3;

        session.recompute_accuracy();
        let first = session.errors.clone();
        session.recompute_accuracy();
        assert_eq!(session.errors, first);
    }

    #[test]
    fn once_wrong_stays_wrong_after_overwrite() {
        let mut session = Session::new("cat", 30.0);
        session.start();
        session.typed = "cx".chars().collect();
        session.cursor = 2;
        session.recompute_accuracy();
        assert!(session.errors.contains(&1));

        // Backspace and retype correctly, then push past the old
        // high-water mark; the snapshot still charges index 1.
        session.typed = "cat".chars().collect();
        session.cursor = 3;
        session.recompute_accuracy();
        assert!(session.errors.contains(&1));
        let expected = (2.0 / 3.0) * 100.0;
        assert!((session.accuracy - expected).abs() < 1e-9);
    }

    #[test]
    fn accuracy_snapshot_waits_for_the_high_water_mark() {
        let mut session = Session::new("cat", 30.0);
        session.start();
        session.typed = "cx".chars().collect();
        session.cursor = 2;
        session.recompute_accuracy();
        assert_eq!(session.accuracy, 50.0);

        // Retyping the same ground correctly does not move the snapshot.
        session.typed = "ca".chars().collect();
        session.cursor = 2;
        session.recompute_accuracy();
        assert_eq!(session.accuracy, 50.0);
    }

    #[test]
    fn clean_prefix_keeps_accuracy_at_100() {
        let mut session = Session::new("cat dog", 30.0);
        session.start();
        session.typed = "cat ".chars().collect();
        session.cursor = 4;
        session.recompute_accuracy();
        assert_eq!(session.accuracy, 100.0);
        assert!(session.errors.is_empty());
    }

    #[test]
    fn cells_classify_every_index() {
        let mut session = Session::new("cat dog", 30.0);
        session.typed = "cx ".chars().collect();
        session.cursor = 3;

        let cells = session.cells();
        assert_matches!(cells[0], CellState::Matched);
        assert_matches!(cells[1], CellState::Mismatched('x'));
        assert_matches!(cells[2], CellState::SkippedSpace);
        assert_matches!(cells[3], CellState::Cursor);
        assert_matches!(cells[4], CellState::Untyped);
        assert_eq!(cells.len(), 7);
    }

    #[test]
    fn typed_space_over_ghost_space_is_a_match_not_a_skip() {
        let mut session = Session::new("a b", 30.0);
        session.typed = "a ".chars().collect();
        session.cursor = 2;

        assert_matches!(session.cells()[1], CellState::Matched);
    }
}
