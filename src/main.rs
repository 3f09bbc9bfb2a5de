mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use seance::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    keymap::{self, Action},
    logging,
    player::{Player, Transition},
    runtime::{CrosstermEventSource, FixedTicker, PlayerEvent, PlayerEventSource, Runner, Ticker},
    session::{Session, SessionError, DEFAULT_SESSION_PATH},
    snapshot::Snapshot,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, warn};
use webbrowser::Browser;

/// terminal workout session player
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Plays a workout session described in JSON: exercises one at a time, repeated for a number of tours, with countdowns for timed exercises, rest between tours and a running total time."
)]
pub struct Cli {
    /// session description to play (JSON); defaults to the configured session, then session.json
    session: Option<PathBuf>,

    /// seconds of rest between tours
    #[clap(short = 'r', long)]
    rest_secs: Option<u32>,

    /// interval in milliseconds at which the screen polls for input and redraws
    #[clap(long)]
    tick_ms: Option<u64>,

    /// remember the effective settings as defaults for next time
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line values take precedence over the stored config.
    fn merged_config(&self, base: Config) -> Config {
        Config {
            session_path: self
                .session
                .as_ref()
                .map(|p| p.display().to_string())
                .or(base.session_path),
            rest_secs: self.rest_secs.unwrap_or(base.rest_secs),
            tick_rate_ms: self.tick_ms.unwrap_or(base.tick_rate_ms),
            log_level: base.log_level,
        }
    }
}

fn session_path(config: &Config) -> PathBuf {
    PathBuf::from(
        config
            .session_path
            .as_deref()
            .unwrap_or(DEFAULT_SESSION_PATH),
    )
}

#[derive(Debug)]
pub struct App {
    pub player: Player,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, rest_secs: u32, now: Instant) -> Result<Self, SessionError> {
        Ok(Self {
            player: Player::new(session, now)?.with_rest_secs(rest_secs),
            notice: None,
            should_quit: false,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.player)
    }

    /// Advances the player's clocks to `now`. Returns true when anything on
    /// screen changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let before = self.clock_face();
        let transitions = self.player.tick(now);
        for transition in &transitions {
            self.note(transition);
        }
        !transitions.is_empty() || self.clock_face() != before
    }

    /// Whole seconds shown by the total clock and both countdowns.
    fn clock_face(&self) -> (u64, u32, u32) {
        (
            self.player.total_clock().shown().as_secs(),
            self.player.exercise_timer().remaining(),
            self.player.rest().remaining(),
        )
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        match keymap::action_for(key, &self.player) {
            Some(Action::Player(command)) => {
                let transition = self.player.apply(command, now);
                self.note(&transition);
            }
            Some(Action::OpenVideo) => self.open_video(),
            Some(Action::Quit) => self.should_quit = true,
            None => {}
        }
    }

    fn note(&mut self, transition: &Transition) {
        match transition {
            Transition::WorkoutCompleted => {
                self.notice = Some(ui::overlay::COMPLETION_MESSAGE.to_string());
            }
            Transition::TourStarted { tour } => {
                self.notice = Some(format!("Tour {tour} started"));
            }
            Transition::Moved { .. } | Transition::ExerciseCompleted { .. } => {
                self.notice = None;
            }
            _ => {}
        }
    }

    fn open_video(&mut self) {
        let Some(url) = self.player.displayed_exercise().video_url() else {
            self.notice = Some("No video for this exercise".to_string());
            return;
        };

        if Browser::is_available() {
            if let Err(err) = webbrowser::open(&url) {
                warn!(%url, %err, "could not open video");
                self.notice = Some(format!("Could not open {url}"));
            }
        } else {
            self.notice = Some(url);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let config = cli.merged_config(store.load());

    if let Some(log_path) = AppDirs::log_path() {
        logging::init(&log_path, &config.log_level);
    }

    if cli.save_config {
        match store.save(&config) {
            Ok(()) => info!(path = %store.path().display(), "config saved"),
            Err(err) => warn!(%err, "could not save config"),
        }
    }

    // Nothing is drawn until the session is known to be playable.
    let session = match Session::load(session_path(&config)) {
        Ok(session) => session,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, err.to_string()).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(session, config.rest_secs, Instant::now())?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.tick_rate_ms.max(1))),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: PlayerEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit {
        let redraw = match runner.step() {
            PlayerEvent::Tick => app.on_tick(Instant::now()),
            PlayerEvent::Resize => true,
            PlayerEvent::Key(key) => {
                let now = Instant::now();
                app.on_tick(now);
                app.on_key(key, now);
                true
            }
        };

        if redraw && !app.should_quit {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::draw(app, f);
}
