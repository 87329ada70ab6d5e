mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ghosttype::{
    config::{Config, ConfigStore, FileConfigStore},
    input::{apply, InputEvent},
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, RuntimeEvent, Ticker},
    session::Session,
    words::WordList,
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use ui::Theme;

/// terminal typing trainer: chase the ghost text, get your wpm
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words in the ghost text
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// session length in seconds
    #[clap(short = 's', long)]
    number_of_secs: Option<usize>,

    /// newline-delimited word list to draw from instead of the built-in one
    #[clap(long)]
    wordlist: Option<PathBuf>,

    /// persist the effective settings as defaults for future runs
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Stored config overridden by whatever flags were given.
    fn effective_config(&self, stored: Config) -> Config {
        Config {
            number_of_words: self.number_of_words.unwrap_or(stored.number_of_words),
            number_of_secs: self.number_of_secs.unwrap_or(stored.number_of_secs),
            wordlist: self.wordlist.clone().or(stored.wordlist),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

pub struct App {
    pub session: Session,
    pub state: AppState,
    pub theme: Theme,
    words: WordList,
    config: Config,
}

impl App {
    pub fn new(config: Config, words: WordList) -> Self {
        let ghost_text = words.generate_ghost_text(config.number_of_words);
        Self {
            session: Session::new(&ghost_text, config.number_of_secs as f64),
            state: AppState::Typing,
            theme: Theme::default(),
            words,
            config,
        }
    }

    /// Fresh session with newly drawn ghost text.
    pub fn reset(&mut self) {
        let ghost_text = self.words.generate_ghost_text(self.config.number_of_words);
        self.session = Session::new(&ghost_text, self.config.number_of_secs as f64);
        self.state = AppState::Typing;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let config = cli.effective_config(store.load());
    if cli.save_config {
        store
            .save(&config)
            .context("unable to save config file")?;
    }

    // Word list problems are fatal before any terminal state changes.
    let words = match &config.wordlist {
        Some(path) => WordList::from_path(path)?,
        None => WordList::embedded()?,
    };

    if !stdin().is_tty() {
        anyhow::bail!("stdin must be a tty");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, words);
    let run_result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    event_loop(terminal, app, &runner)
}

fn event_loop<B, E, T>(terminal: &mut Terminal<B>, app: &mut App, runner: &Runner<E, T>) -> Result<()>
where
    B: Backend,
    E: EventSource,
    T: Ticker,
{
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            RuntimeEvent::Tick => {
                if app.session.is_running() {
                    app.session.on_tick(runner.tick_interval_ms());
                    if app.session.has_timed_out() {
                        app.state = AppState::Results;
                    }
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            RuntimeEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            RuntimeEvent::Key(key) => {
                let Some(event) = InputEvent::from_key(key) else {
                    continue;
                };

                match (app.state, event) {
                    (_, InputEvent::Quit) => return Ok(()),
                    (AppState::Typing, event) => apply(&mut app.session, event),
                    (AppState::Results, InputEvent::Char('r')) => app.reset(),
                    (AppState::Results, _) => {}
                }

                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }
}
