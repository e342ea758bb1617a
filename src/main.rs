mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use display::{Scoreboard, TerminalSurface};
use shisa_shooter::config::GameConfig;
use shisa_shooter::game_loop::{Schedule, Session};
use shisa_shooter::input::Key;
use shisa_shooter::render::ScoreDisplay;

/// A direction is considered "held" while press/repeat events keep
/// arriving within this window. Only used on terminals that never send
/// release events; it has to outlast the OS key-repeat delay.
const HOLD_WINDOW: Duration = Duration::from_millis(550);

#[derive(Parser, Debug)]
#[command(name = "shisa_shooter")]
#[command(about = "Shisa vs. the goya formation, in your terminal")]
struct Args {
    /// Logical field width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Logical field height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Seed for enemy fire; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write trace output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    // stdout belongs to the renderer; without a file we stay silent.
    let Some(path) = path else { return Ok(()) };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: with keyboard enhancement the terminal reports proper
/// `Press` / `Repeat` / `Release` events and they map straight onto the
/// session. Classic terminals only send `Press` (OS key-repeat shows as
/// repeated presses), so the last direction pressed is remembered with
/// the time it was last seen and released once `HOLD_WINDOW` passes
/// without a refresh.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session<StdRng>,
    surface: &mut TerminalSurface,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
    keyboard_enhanced: bool,
) -> anyhow::Result<()> {
    let mut scoreboard = Scoreboard::default();
    scoreboard.show_score(session.state().score);

    let mut held: Option<(Key, Instant)> = None;
    let clock = Instant::now();
    let mut frozen = false;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind != KeyEventKind::Release && is_quit(code, modifiers) {
                return Ok(());
            }
            let Some(key) = map_key(code) else { continue };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    session.key_down(key);
                    if !keyboard_enhanced && key != Key::Fire {
                        held = Some((key, frame_start));
                    }
                }
                KeyEventKind::Release => session.key_up(key),
            }
        }

        if let Some((key, seen)) = held {
            if frame_start.duration_since(seen) > HOLD_WINDOW {
                session.key_up(key);
                held = None;
            }
        }

        // ── Tick & draw ───────────────────────────────────────────────────────
        if !frozen {
            let now = clock.elapsed().as_millis() as u64;
            if session.on_frame(now, surface, &mut scoreboard) == Schedule::Stop {
                frozen = true;
            }
            surface.present(out, &scoreboard)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = GameConfig::with_field(args.width, args.height);
    config.validate().context("invalid field configuration")?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(?args, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release events where the terminal supports them; must happen
    // before the reader thread starts consuming input.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = terminal::size()
        .context("cannot read terminal size")
        .and_then(|(width, height)| {
            let mut surface =
                TerminalSurface::new(width, height, config.field_width, config.field_height);
            let mut session = Session::new(config, rng);
            let frame = Duration::from_secs_f64(1.0 / args.fps as f64);
            game_loop(&mut out, &mut session, &mut surface, &rx, frame, keyboard_enhanced)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}
