pub mod game_screen;
pub mod helpers;
pub mod screen;

use std::{fs::File, io::stdout, path::{Path, PathBuf}, sync::Mutex, thread::sleep, time::{Duration, SystemTime, UNIX_EPOCH}};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ratatui::{crossterm::{event::{DisableMouseCapture, EnableMouseCapture, Event}, execute}, layout::Rect, DefaultTerminal, Frame};
use simon_core::SimonConfig;
use tracing::{info, Level};
use tracing_subscriber::util::SubscriberInitExt;

use crate::{game_screen::GameScreen, helpers::poll_events, touch_test::TouchTest};

pub trait Component {
    fn update(&mut self, events: Vec<Event>);
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

pub enum GlobalEvent {
    Quit,
}

#[derive(Parser)]
#[command(name = "simon")]
#[command(version, about = "Simon, the sequence-memory game, in a terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    game: GameArgs,

    /// Milliseconds per game tick
    #[arg(long, default_value_t = 100, global = true)]
    tick_ms: u64,

    /// Where log output goes; the terminal belongs to the game
    #[arg(long, default_value = "simon.log", global = true)]
    log_file: PathBuf,

    /// Most verbose level written to the log file
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,
}

#[derive(Subcommand)]
enum Commands {
    /// Play (the default)
    Play,

    /// Touch regions repeatedly to check the input mapping, without playing
    TouchTest {
        /// Number of touches to record before exiting
        #[arg(short, long, default_value_t = 8)]
        count: usize,
    },
}

/// Game tuning; anything left out keeps the built-in default.
#[derive(Args)]
struct GameArgs {
    /// Length of the generated sequence
    #[arg(long)]
    capacity: Option<usize>,

    /// Symbols to repeat before the first round is won
    #[arg(long)]
    round_length: Option<usize>,

    /// Ticks each symbol stays in its pause phase during playback
    #[arg(long)]
    pause_ticks: Option<u16>,

    /// Ticks the player gets for each touch
    #[arg(long)]
    verify_timeout: Option<u16>,

    /// Ticks the game-over message stays up
    #[arg(long)]
    game_over_delay: Option<u16>,

    /// Ticks the congratulation stays up
    #[arg(long)]
    congratulate_delay: Option<u16>,

    /// Ticks to wait for "play again" before starting over
    #[arg(long)]
    congratulate_timeout: Option<u16>,

    /// Fixed seed for reproducible games (random otherwise)
    #[arg(long)]
    seed: Option<u64>,
}

impl GameArgs {
    fn config(&self) -> Result<SimonConfig> {
        let defaults = SimonConfig::default();
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or_default()
        });

        let config = SimonConfig {
            sequence_capacity: self.capacity.unwrap_or(defaults.sequence_capacity),
            initial_round_length: self.round_length.unwrap_or(defaults.initial_round_length),
            playback_pause_ticks: self.pause_ticks.unwrap_or(defaults.playback_pause_ticks),
            verify_timeout_ticks: self.verify_timeout.unwrap_or(defaults.verify_timeout_ticks),
            game_over_delay_ticks: self.game_over_delay.unwrap_or(defaults.game_over_delay_ticks),
            congratulate_delay_ticks: self.congratulate_delay.unwrap_or(defaults.congratulate_delay_ticks),
            congratulate_touch_timeout_ticks: self.congratulate_timeout.unwrap_or(defaults.congratulate_touch_timeout_ticks),
            extents: defaults.extents,
            seed,
        };
        config.validate().context("invalid game settings")?;
        Ok(config)
    }
}

fn setup_logging(path: &Path, level: Level) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;

    // also installs the `log` bridge, so the core's records land here too
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .finish()
        .try_init()?;
    Ok(())
}

pub struct App {
    terminal: DefaultTerminal,
    state: Box<dyn Component>,
    rx: crossbeam_channel::Receiver<GlobalEvent>,
}

impl App {
    /// One frame. `false` once someone asked to quit.
    fn run(&mut self) -> Result<bool> {
        self.terminal.draw(|f| {
            let events = poll_events();
            self.state.update(events);
            self.state.render(f, f.area());
        })?;

        for event in self.rx.try_iter() {
            match event {
                GlobalEvent::Quit => return Ok(false),
            }
        }

        Ok(true)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_file, cli.log_level)?;
    let config = cli.game.config()?;

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|_| run(terminal, &cli, config));
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn run(terminal: DefaultTerminal, cli: &Cli, config: SimonConfig) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let tick = Duration::from_millis(cli.tick_ms);

    let state: Box<dyn Component> = match cli.command {
        None | Some(Commands::Play) => Box::new(GameScreen::init(tx, config, tick)?),
        Some(Commands::TouchTest { count }) => Box::new(TouchTest::init(tx, config.extents, count.max(1), tick)),
    };

    let mut app = App { terminal, state, rx };

    // Drain any pending terminal input (for example the newline that launched
    // us) so the first update() doesn't see stale key events.
    let _ = poll_events();

    while app.run()? {
        sleep(Duration::from_millis(16));
    }

    info!("bye");
    Ok(())
}
