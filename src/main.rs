mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::{thread_rng, Rng};

use star_shooter::clock::{Clock, SystemClock};
use star_shooter::compute::{LossCause, TickOutcome};
use star_shooter::config::Config;
use star_shooter::draw;
use star_shooter::error::GameError;
use star_shooter::session::Session;

use display::keys::{KeyTracker, CLASSIC_HOLD_WINDOW_MS, ENHANCED_HOLD_WINDOW_MS};
use display::{TerminalRenderer, Viewport};

#[derive(Parser)]
#[command(name = "star_shooter")]
#[command(about = "Terminal arcade shooter: waves, asteroids, two ships", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Outline collision boxes from the first frame
    #[arg(long)]
    hitboxes: bool,

    /// Leave player two's keys unbound
    #[arg(long)]
    single_player: bool,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the session is lost or quit.
///
/// Each tick: drain pending terminal events, fold key events into an
/// `InputFrame`, step the session, draw, then sleep off the rest of the
/// tick budget. Resize events refit the viewport before the draw.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    clock: &impl Clock,
    rx: &mpsc::Receiver<Event>,
    hold_window_ms: u64,
    rng: &mut impl Rng,
) -> std::io::Result<TickOutcome> {
    let arena = &session.world.config.arena;
    let budget = Duration::from_secs(1) / arena.tick_rate;
    let (arena_w, arena_h) = (arena.width, arena.height);

    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(out, Viewport::fit(cols, rows, arena_w, arena_h));
    let mut keys = KeyTracker::new(hold_window_ms);

    loop {
        let tick_start = Instant::now();
        let now = clock.now_ms();

        let mut key_events = Vec::new();
        for ev in rx.try_iter() {
            match ev {
                Event::Key(key) => key_events.push(key),
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }
        let input = keys.frame(key_events, now);

        let outcome = session.step(&input, now, rng);
        if outcome != TickOutcome::Running {
            return Ok(outcome);
        }

        let label = session.score_label(now);
        draw::render(&session.world, &label, &mut renderer)?;

        let elapsed = tick_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        } else {
            log::debug!("tick {} overran by {:?}", session.world.frame, elapsed - budget);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.hitboxes {
        config.session.show_hitboxes = true;
    }
    if cli.single_player {
        config.session.two_player = false;
    }
    if log::log_enabled!(log::Level::Debug) {
        match config.to_toml() {
            Ok(dump) => log::debug!("effective config:\n{}", dump),
            Err(e) => log::warn!("could not dump config: {}", e),
        }
    }

    let clock = SystemClock::new();
    let mut rng = thread_rng();
    let mut session = Session::start(config, clock.now_ms(), &mut rng)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events only arrive from terminals speaking the kitty protocol.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    let hold_window_ms = if keyboard_enhanced {
        ENHANCED_HOLD_WINDOW_MS
    } else {
        CLASSIC_HOLD_WINDOW_MS
    };

    // Blocking reads live on their own thread so a tick never waits on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &clock, &rx, hold_window_ms, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let outcome = result?;
    let score = session.finish(clock.now_ms())?;

    match outcome {
        TickOutcome::Loss(cause) => {
            let reason = match cause {
                LossCause::EnemyReachedBottom => "an enemy got through".to_string(),
                LossCause::EnemyHitPlayer(id) => format!("player {} rammed", id.index() + 1),
                LossCause::AsteroidHitPlayer(id) => {
                    format!("player {} hit an asteroid", id.index() + 1)
                }
            };
            println!("Game over: {}. Score: {}", reason, score);
        }
        _ => println!("Score: {}", score),
    }
    if score > session.high_score {
        println!("New high score!");
    }
    Ok(())
}
