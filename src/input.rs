use crate::session::Session;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Discrete input events the engine understands, decoupled from the
/// terminal backend. Exhaustively matched in [`apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Space,
    Backspace,
    Quit,
}

impl InputEvent {
    /// Translate a crossterm key event. Keys with no engine meaning
    /// (arrows, function keys, ...) map to None.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            KeyCode::Backspace => Some(InputEvent::Backspace),
            KeyCode::Char(' ') => Some(InputEvent::Space),
            KeyCode::Char(c) => Some(InputEvent::Char(c)),
            _ => None,
        }
    }
}

/// Apply one input event to the session. Quit is handled by the event
/// loop before the engine sees it; it is a no-op here.
pub fn apply(session: &mut Session, event: InputEvent) {
    match event {
        InputEvent::Char(c) => write_char(session, c),
        InputEvent::Space => skip_word(session),
        InputEvent::Backspace => backspace(session),
        InputEvent::Quit => {}
    }
}

/// Type one character at the cursor. Starts the clock on the first
/// character. If the cursor sits on a word delimiter the ghost text is
/// elongated by one space so typed and ghost stay aligned one-to-one;
/// the over-typed character then scores as a mismatch against that
/// space.
fn write_char(session: &mut Session, c: char) {
    if session.has_timed_out() || session.cursor >= session.ghost.len() {
        return;
    }

    session.start();

    if session.ghost[session.cursor] == ' ' {
        session.ghost.insert(session.cursor, ' ');
    }

    session.typed.push(c);
    session.cursor += 1;

    if session.is_running() {
        session.recompute_accuracy();
    }
}

/// Word-skip: jump the typed cursor to the next word boundary in the
/// ghost text. Mid-word, the untyped remainder is filled with spaces and
/// the cursor lands on the delimiter; already on the delimiter, a single
/// space consumes it. With no delimiter ahead (last word) the event is a
/// no-op.
fn skip_word(session: &mut Session) {
    if session.has_timed_out() {
        return;
    }

    let offset = match session.ghost[session.cursor..]
        .iter()
        .position(|&g| g == ' ')
    {
        Some(offset) => offset,
        None => return,
    };
    let count = if offset == 0 { 1 } else { offset };

    session.typed.extend(std::iter::repeat(' ').take(count));
    session.cursor += count;

    if session.is_running() {
        session.recompute_accuracy();
    }
}

/// Remove the last typed character. When the cursor sits on a pair of
/// adjacent ghost spaces, one of them is an elongation left behind by
/// over-typing; merge it away to bring ghost and typed back in sync.
fn backspace(session: &mut Session) {
    if session.has_timed_out() || session.cursor == 0 {
        return;
    }

    if session.cursor < session.ghost.len()
        && session.ghost[session.cursor] == ' '
        && session.ghost[session.cursor - 1] == ' '
    {
        session.ghost.remove(session.cursor - 1);
    }

    session.typed.pop();
    session.cursor -= 1;

    if session.is_running() {
        session.recompute_accuracy();
    }
}
