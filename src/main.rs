use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use skybird::config::{self, CliAction, GameConfig};
use skybird::error::Result;
use skybird::frame::{FramePacer, Orchestrator};
use skybird::input;
use skybird::services::{LogAudio, NoAssets};
use skybird::session::Session;
use skybird::ui::{self, Viewport};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("skybird: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = match config::parse_args(std::env::args().skip(1)) {
        Ok(CliAction::Run(options)) => options,
        Ok(CliAction::Version) => {
            println!("skybird {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Ok(CliAction::Help) => {
            println!("{}", config::USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Run 'skybird --help' for usage.");
            std::process::exit(1);
        }
    };

    let mut config = GameConfig::load(options.config.as_deref())?;
    config.apply(&options);
    init_logging(&config.log.level)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        seed = ?config.seed,
        difficulty = config.difficulty.name(),
        tick_rate = config.tick_rate,
        "starting"
    );

    let assets = NoAssets;
    let mut audio = LogAudio::load(&assets);
    let session = Session::new(config.seed, config.difficulty, config.audio).with_tick_rate(config.tick_rate);
    let mut orchestrator = Orchestrator::new(session, &mut audio);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut orchestrator, &mut audio, &assets, config.tick_rate);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        high_score = orchestrator.session.high_score,
        frames = orchestrator.frames(),
        "exiting"
    );
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    orchestrator: &mut Orchestrator,
    audio: &mut LogAudio,
    assets: &NoAssets,
    tick_rate: u32,
) -> Result<()> {
    let mut pacer = FramePacer::new(tick_rate);
    let mut viewport = Viewport::new(terminal.size()?);

    loop {
        terminal.draw(|frame| {
            viewport = ui::draw_ui(frame, orchestrator, assets);
        })?;

        // Collect input until the next tick is due
        let mut commands = Vec::new();
        loop {
            let wait = pacer.wait_time(Instant::now());
            if wait.is_zero() {
                break;
            }
            if event::poll(wait)? {
                if let Some(command) = input::map_event(event::read()?, &viewport) {
                    commands.push(command);
                }
            }
        }
        pacer.advance(Instant::now());

        if !orchestrator.frame(commands, audio) {
            return Ok(());
        }
    }
}

/// Log to ~/.skybird/skybird.log; the terminal belongs to the game.
fn init_logging(level: &str) -> Result<()> {
    let path = config::skybird_dir()?.join(config::LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
