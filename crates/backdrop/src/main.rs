use std::time::{Duration, Instant};

use backdrop_config::{Config, ConfigError, RotationState, RotationStore};
use backdrop_core::{AnimationKind, RotationMode, Theme};
use backdrop_engine::{
    DEFAULT_ROTATION_INTERVAL, FrameDriver, PixelCanvas, RotationTimer, Rotator, Viewport,
};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fastrand::Rng;
use ratatui::{DefaultTerminal, Frame};
use tracing::{info, warn};

mod cli;
mod hud;
mod logging;

use cli::Cli;
use hud::HudStatus;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = logging::log_path(cli.log_file.as_deref()) {
        logging::init(&path)?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => match Config::load() {
            Err(ConfigError::NoHomeDirectory) => Config::default(),
            other => other?,
        },
    };
    cli.apply(&mut config);
    if cli.save_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        info!("configuration saved");
    }

    let store = match RotationStore::open_default() {
        Ok(store) => Some(store),
        Err(err) => {
            warn!(%err, "rotation state will not persist");
            None
        }
    };

    let terminal = ratatui::init();
    let result = App::new(config, cli.animation, store).run(terminal);
    ratatui::restore();
    result
}

/// Animation to open with: an explicit `--animation`, else the entry after
/// the persisted round-robin position, else the configured default.
fn initial_kind(
    explicit: Option<AnimationKind>,
    config: &Config,
    rotator: &Rotator,
    state: RotationState,
) -> AnimationKind {
    match (explicit, config.rotation) {
        (Some(kind), _) => kind,
        (None, RotationMode::RoundRobin) => {
            rotator.kind_at(rotator.pick_next_round_robin(state.last_index))
        }
        (None, RotationMode::Random) => config.animation,
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    driver: FrameDriver<PixelCanvas>,
    rotator: Rotator,
    /// Auto-rotation; `None` while disabled.
    timer: Option<RotationTimer>,
    rotation_mode: RotationMode,
    rotate_every: Duration,
    rotation: RotationState,
    store: Option<RotationStore>,
    rng: Rng,
    theme: Theme,
    /// Animation the user wants, even while it cannot run.
    kind: AnimationKind,
    viewport: Viewport,
    /// Why the placeholder is showing instead of an animation.
    fallback: Option<String>,
    show_hud: bool,
    frame_interval: Duration,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        config: Config,
        explicit: Option<AnimationKind>,
        store: Option<RotationStore>,
    ) -> Self {
        let rotator = Rotator::default();
        let rotation = store
            .as_ref()
            .map(|store| {
                store.load().unwrap_or_else(|err| {
                    let path = store.path().display();
                    warn!(%err, %path, "ignoring unreadable rotation state");
                    RotationState::default()
                })
            })
            .unwrap_or_default();
        let kind = initial_kind(explicit, &config, &rotator, rotation);

        let mut driver = FrameDriver::new(
            PixelCanvas::default(),
            config.scene.clone(),
            config.theme.palette(),
        );
        driver.set_speed(config.speed);
        driver.set_timing(config.timing);

        let now = Instant::now();
        Self {
            running: false,
            driver,
            timer: config
                .rotation_interval()
                .map(|every| RotationTimer::new(every, now)),
            rotation_mode: config.rotation,
            rotate_every: config.rotation_interval().unwrap_or(DEFAULT_ROTATION_INTERVAL),
            rotation: RotationState {
                last_index: rotator.index_of(kind).unwrap_or(0),
            },
            rotator,
            store,
            rng: Rng::new(),
            theme: config.theme,
            kind,
            viewport: Viewport::default(),
            fallback: None,
            show_hud: true,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(config.fps.max(1))),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.on_resize(size.width, size.height);
        while self.running {
            let frame_start = Instant::now();
            self.tick(frame_start);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(frame_start + self.frame_interval)?;
        }
        Ok(())
    }

    /// One host frame: auto-rotate if due, then step the animation.
    fn tick(&mut self, now: Instant) {
        if self.timer.as_mut().is_some_and(|timer| timer.poll(now)) {
            let next = self.next_auto_pick();
            self.show(next);
        }
        self.driver.on_frame(now);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let palette = self.theme.palette();
        match &self.fallback {
            Some(reason) => hud::render_placeholder(frame, area, palette, reason),
            None => frame.render_widget(self.driver.surface(), area),
        }
        if self.show_hud {
            let stats = self.driver.stats();
            let status = HudStatus {
                animation: self.kind,
                theme: self.theme,
                speed: self.driver.speed(),
                timing: self.driver.timing(),
                paused: self.driver.is_paused(),
                fps: stats.fps(),
                degraded: stats.is_degraded(),
                next_rotation: self.timer.map(|timer| timer.remaining(Instant::now())),
            };
            hud::render(frame, area, &status, palette);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self, next_frame: Instant) -> color_eyre::Result<()> {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('n')) => {
                let index = self.rotator.pick_next_round_robin(self.rotation.last_index);
                self.manual_pick(self.rotator.kind_at(index));
            }
            (_, KeyCode::Char('r')) => {
                let kind = self.rotator.pick_random_excluding(self.kind, &mut self.rng);
                self.manual_pick(kind);
            }
            (_, KeyCode::Char(digit @ '1'..='9')) => {
                let index = digit as usize - '1' as usize;
                if index < self.rotator.catalog().len() {
                    self.manual_pick(self.rotator.kind_at(index));
                }
            }
            (_, KeyCode::Char('a')) => self.toggle_auto_rotate(),
            (_, KeyCode::Char('c')) => self.cycle_theme(),
            (_, KeyCode::Char('s')) => self.driver.set_speed(self.driver.speed().next()),
            (_, KeyCode::Char('t')) => self.driver.set_timing(self.driver.timing().toggle()),
            (_, KeyCode::Char(' ')) => self.driver.toggle_pause(),
            (_, KeyCode::Char('h')) => self.show_hud = !self.show_hud,
            _ => {}
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::from_cells(cols, rows);
        let result = if self.driver.active_kind().is_some() {
            self.driver.resize(self.viewport)
        } else {
            self.driver.start(self.kind, self.viewport)
        };
        self.settle(result);
    }

    fn next_auto_pick(&mut self) -> AnimationKind {
        match self.rotation_mode {
            RotationMode::Random => self.rotator.pick_random_excluding(self.kind, &mut self.rng),
            RotationMode::RoundRobin => {
                let index = self.rotator.pick_next_round_robin(self.rotation.last_index);
                self.rotator.kind_at(index)
            }
        }
    }

    /// Switch after a key press; the auto-rotation interval restarts.
    fn manual_pick(&mut self, kind: AnimationKind) {
        if let Some(timer) = self.timer.as_mut() {
            timer.reset(Instant::now());
        }
        self.show(kind);
    }

    /// Make `kind` the current animation and remember where rotation is.
    fn show(&mut self, kind: AnimationKind) {
        info!(animation = %kind, "rotating");
        self.kind = kind;
        if let Some(index) = self.rotator.index_of(kind) {
            self.rotation.last_index = index;
        }
        let result = if self.driver.is_running() {
            self.driver.swap(kind)
        } else {
            self.driver.start(kind, self.viewport)
        };
        self.settle(result);
        self.persist_rotation();
    }

    fn settle(&mut self, result: Result<(), backdrop_engine::EngineError>) {
        match result {
            Ok(()) => self.fallback = None,
            Err(err) => {
                warn!(%err, animation = %self.kind, "showing placeholder");
                self.fallback = Some(err.to_string());
            }
        }
    }

    fn toggle_auto_rotate(&mut self) {
        self.timer = match self.timer {
            Some(_) => None,
            None => Some(RotationTimer::new(self.rotate_every, Instant::now())),
        };
        info!(enabled = self.timer.is_some(), "auto-rotation toggled");
    }

    /// Cycle through available color themes.
    fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.driver.set_palette(self.theme.palette());
    }

    fn persist_rotation(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.save(self.rotation) {
            warn!(%err, "could not save rotation state");
        }
    }

    /// Tear down in order: timer, frame loop, then the durable index.
    fn quit(&mut self) {
        self.timer = None;
        self.driver.stop();
        self.persist_rotation();
        self.running = false;
    }
}
