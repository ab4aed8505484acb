use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{OptionExt, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::DefaultTerminal;
use ringlet_config::{Config, default_config_path};
use ringlet_core::Viewport;
use ringlet_scene::{Stage, SystemClock};

mod cli;
mod logging;

use cli::CliArgs;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config = match &config_path {
        Some(path) => Config::load_or_default(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.write_config {
        let path = write_config(&config, config_path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    match logging::log_path(&config.logging) {
        Some(path) => {
            if let Err(err) = logging::init_logging(&config.logging, &path) {
                eprintln!("logging disabled: {}: {err}", path.display());
            }
        }
        None => eprintln!("logging disabled: no data directory on this platform"),
    }
    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "configuration resolved"),
        None => tracing::info!("configuration resolved from defaults"),
    }

    let terminal = ratatui::try_init().wrap_err("failed to initialize terminal")?;
    let result = App::new(&config, &terminal).and_then(|app| app.run(terminal));
    ratatui::restore();
    tracing::info!("shutting down");
    result
}

/// Save the effective configuration, returning where it went.
fn write_config(config: &Config, path: Option<PathBuf>) -> color_eyre::Result<PathBuf> {
    let path = path.ok_or_eyre("no config directory on this platform")?;
    config
        .save(&path)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// The main application which owns the stage and the event loop.
pub struct App {
    /// Is the application running?
    running: bool,
    /// The animated planet and starfield.
    stage: Stage<StdRng, SystemClock>,
    /// Longest time to block on terminal events.
    frame_interval: Duration,
}

impl App {
    /// Build the stage for the terminal's current size.
    pub fn new(config: &Config, terminal: &DefaultTerminal) -> color_eyre::Result<Self> {
        let size = terminal.size()?;
        let viewport = Viewport::from_size(size).wrap_err("terminal has no drawable area")?;

        let seed = config.stars.seed.unwrap_or_else(rand::random);
        tracing::info!(%viewport, seed, stars = config.stars.count, "starting");

        Ok(Self {
            running: false,
            stage: Stage::new(
                config,
                viewport,
                StdRng::seed_from_u64(seed),
                SystemClock::new(),
            ),
            frame_interval: Duration::from_secs(1) / config.display.fps.max(1),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.stage.pump();
        while self.running {
            terminal.draw(|frame| self.stage.render(frame))?;
            self.handle_crossterm_events()?;
            self.stage.pump();
        }
        Ok(())
    }

    /// Wait for terminal events until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.stage.until_next().min(self.frame_interval);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Quit keys only; the animation itself takes no input.
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Carry a terminal resize into the stage.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        match Viewport::from_cells(cols, rows) {
            Ok(viewport) => self.stage.resize(viewport),
            Err(err) => tracing::debug!(%err, "ignoring resize"),
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
