//! Headless driver for the storybook reading engine.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Load the story catalog (bundled fixture or configured override).
//! - Open a reader session and drive it with a wall-clock tick loop.

use anyhow::{Result, anyhow};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use storytime::catalog::Catalog;
use storytime::config::load_config;
use storytime::reader::{Command, Mode, PlaybackState, ReaderSession};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());

    let catalog = match config.catalog_path.as_deref() {
        Some(path) => Catalog::load(Path::new(path)),
        None => Catalog::bundled().clone(),
    };

    match args {
        Args::List => {
            for summary in catalog.summaries() {
                println!(
                    "{:<24} {:<40} {} pages, {}, ages {}",
                    summary.id, summary.title, summary.page_count, summary.duration, summary.age_range
                );
            }
            return Ok(());
        }
        Args::Open { story_id, entry } => {
            let mut session = ReaderSession::open(
                &catalog,
                &story_id,
                entry.as_deref(),
                Instant::now(),
            )?;
            if session.mode() == Mode::Unset {
                // Non-interactive shell: show the cover, then default to read.
                let snap = session.snapshot();
                println!("{} — by {}  [{}]", snap.title, snap.author, snap.cover_image);
                info!("No concrete mode given; defaulting to read");
                session.handle(Command::SelectReadMode, Instant::now());
            }
            match session.mode() {
                Mode::Read => run_read(&mut session),
                Mode::Listen => run_listen(&mut session, config.tick_interval_ms),
                Mode::Unset => unreachable!("mode defaulted above"),
            }
            session.close();
        }
    }
    Ok(())
}

/// Step through every page with real fade timing, printing each one.
fn run_read(session: &mut ReaderSession) {
    loop {
        let snap = session.snapshot();
        println!("\n[{}] {}", snap.page_indicator, snap.page_text);
        if snap.is_last_page {
            break;
        }
        session.handle(Command::SwipeReleased { dx: -60.0 }, Instant::now());
        while session.snapshot().transitioning {
            std::thread::sleep(Duration::from_millis(50));
            session.tick(Instant::now());
        }
    }
}

/// Tick the session in real time until playback finishes or Ctrl-C.
fn run_listen(session: &mut ReaderSession, tick_interval_ms: u64) {
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        if let Err(err) = ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst)) {
            warn!("Could not install Ctrl-C handler: {err}");
        }
    }

    let mut last_page = session.current_page();
    let mut last_position = u32::MAX;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            info!("Interrupted; tearing the session down");
            break;
        }
        session.tick(Instant::now());
        let snap = session.snapshot();
        if snap.current_page != last_page {
            last_page = snap.current_page;
            println!("\n[{}] {}", snap.page_indicator, snap.page_text);
        }
        if let Some(audio) = &snap.audio {
            if audio.position_secs != last_position {
                last_position = audio.position_secs;
                info!(
                    position = %audio.position_label,
                    duration = %audio.duration_label,
                    "Playback tick"
                );
            }
            if !audio.can_play {
                warn!("Story has no audio; nothing to listen to");
                break;
            }
        }
        if session.playback_state() == PlaybackState::Finished {
            info!("Story finished");
            break;
        }
        std::thread::sleep(Duration::from_millis(tick_interval_ms));
    }
}

enum Args {
    List,
    Open {
        story_id: String,
        entry: Option<String>,
    },
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let first = args
        .next()
        .ok_or_else(|| anyhow!("Usage: storytime <story-id> [read|listen|open] | storytime list"))?;
    if first == "list" {
        return Ok(Args::List);
    }
    Ok(Args::Open {
        story_id: first,
        entry: args.next(),
    })
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
