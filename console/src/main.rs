use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use badgesweep_core as game;
use clap::Parser;
use game::SeedSource;
use web_time::Instant;

mod input;
mod seed;
mod settings;
mod term;

use input::CommandInput;
use settings::Settings;
use term::TextRenderer;

/// Minesweeper for a six-button badge, played in the terminal.
///
/// Commands: w/a/s/d move, j or space reveals, k or f flags, `.` idles, q quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play these commands instead of reading stdin
    #[arg(long)]
    script: Option<String>,

    #[command(flatten)]
    overrides: settings::Overrides,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.apply(&args.overrides);
    settings.validate()?;
    log::debug!("settings: {:?}", settings);

    let seed = match args.seed {
        Some(seed) => game::FixedSeed(seed).seed(),
        None => seed::ClockSeed.seed(),
    };
    log::info!("seed: {seed}");

    let session = game::GameSession::new(settings.game, game::RandomBoardGenerator::new(seed))
        .context("could not start game")?;
    let mut driver = game::FrameDriver::new(session, settings.frame_config())?;

    let stdout = io::stdout();
    let clear = stdout.is_terminal() && args.script.is_none();
    let mut renderer = TextRenderer::new(stdout.lock()).with_clear(clear);

    match &args.script {
        Some(script) => play(&mut driver, &mut CommandInput::script(script), &mut renderer),
        None => play(&mut driver, &mut CommandInput::reader(io::stdin().lock()), &mut renderer),
    }
}

/// Runs the driver until input ends, drawing whenever it is about to wait for more input so
/// the screen never lags behind the game.
fn play<R: BufRead, W: Write>(
    driver: &mut game::FrameDriver,
    input: &mut CommandInput<R>,
    renderer: &mut TextRenderer<W>,
) -> Result<()> {
    let start = Instant::now();
    driver.render(start.elapsed(), renderer)?;

    let mut stale = false;
    while let Some(tick) = driver.tick(start.elapsed(), input, renderer)? {
        stale = !tick.rendered && (stale || tick.report.has_update() || tick.won);
        if stale && input.is_drained() {
            driver.render(start.elapsed(), renderer)?;
            stale = false;
        }
        if tick.won {
            log::info!("Board cleared");
        }
    }

    if stale {
        driver.render(start.elapsed(), renderer)?;
    }
    log::debug!("Input finished in state {:?}", driver.session().state());
    Ok(())
}
