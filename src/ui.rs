use ghosttype::session::{CellState, Session};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;

/// Styling for the typing view. Owned by the app and passed in here;
/// the engine holds no rendering state.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub ghost: Style,
    pub matched: Style,
    pub mismatched: Style,
    pub cursor: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            ghost: bold.add_modifier(Modifier::DIM),
            matched: bold.fg(Color::Green),
            mismatched: bold.fg(Color::Red),
            cursor: bold.add_modifier(Modifier::DIM | Modifier::UNDERLINED),
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(&self.session, &self.theme, area, buf),
            AppState::Results => render_results(&self.session, area, buf),
        }
    }
}

fn render_typing(session: &Session, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let ghost_text = session.ghost_text();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut prompt_occupied_lines =
        ((ghost_text.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if ghost_text.width() <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(
                    ((area.height as f64 - prompt_occupied_lines as f64) / 2.0) as u16,
                ),
                Constraint::Length(2),
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(
                    ((area.height as f64 - prompt_occupied_lines as f64) / 2.0) as u16,
                ),
            ]
            .as_ref(),
        )
        .split(area);

    let header = Paragraph::new(Span::styled(
        format!(
            "TIME {:>4.0}s   WPM {:>3}   ACC {:>6.2}%",
            session.clock.remaining_secs(),
            session.wpm,
            session.accuracy,
        ),
        theme.ghost,
    ))
    .alignment(Alignment::Center);
    header.render(chunks[1], buf);

    let spans = session
        .cells()
        .iter()
        .zip(session.ghost.iter())
        .map(|(&cell, &ghost_char)| match cell {
            CellState::Matched => Span::styled(ghost_char.to_string(), theme.matched),
            CellState::Mismatched(typed) => Span::styled(typed.to_string(), theme.mismatched),
            // A skip-inserted space leaves the ghost character visible,
            // faded, rather than flagging it red.
            CellState::SkippedSpace => Span::styled(ghost_char.to_string(), theme.ghost),
            CellState::Cursor => Span::styled(ghost_char.to_string(), theme.cursor),
            CellState::Untyped => Span::styled(ghost_char.to_string(), theme.ghost),
        })
        .collect::<Vec<Span>>();

    let prompt = Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    prompt.render(chunks[2], buf);
}

fn render_results(session: &Session, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(area.height / 2),
                Constraint::Length(2),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let summary = Paragraph::new(Span::styled(
        format!("WPM {}   ACC {:.2}%", session.wpm, session.accuracy),
        bold,
    ))
    .alignment(Alignment::Center);
    summary.render(chunks[0], buf);

    let legend = Paragraph::new(Span::styled(
        "(r)etry / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[1], buf);
}
