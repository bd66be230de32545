//! # Cadence Demo
//!
//! Wires a bus, a loop, a real-time frame clock and both screens, then plays
//! a short scripted session: log in, play, pause from the button, resume,
//! pause again.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=cadence=debug cadence_demo [config.toml]
//! ```
//!
//! Without an argument `config/cadence.toml` is used if it exists, otherwise
//! the built-in defaults.

use std::error::Error;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cadence::core::{EventBus, Login, LoopTick};
use cadence::shared::CadenceConfig;
use cadence::{FrameClock, FrameClockStats, GameLoop, LandingScreen, PlayButton};

const DEFAULT_CONFIG_PATH: &str = "config/cadence.toml";

/// Upper bound for draining the last requested frame after a pause.
const DRAIN_LIMIT: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CADENCE DEMO                                             ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Target FPS:         {}", config.game_loop.target_fps);
    println!("│ Refresh Rate:       {} Hz", config.host.refresh_rate);
    println!("│ Run For:            {} ms", config.host.run_for_ms);
    println!("│ Dispatch Policy:    {:?}", config.dispatch.policy);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let bus = EventBus::with_policy(config.dispatch.policy);
    let clock = Arc::new(FrameClock::new(config.host.refresh_rate));
    let game_loop = GameLoop::with_config(bus.clone(), clock.clone(), &config.game_loop);

    let landing = LandingScreen::mount(&bus);
    let play_button = PlayButton::mount(&bus);

    let starter = game_loop.clone();
    bus.on(move |_: &Login| starter.start());

    let loop_ticks = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&loop_ticks);
    bus.on(move |_: &LoopTick| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let half = Duration::from_millis(config.host.run_for_ms / 2);
    let mut host = FrameClockStats::default();

    landing.login()?;
    accumulate(&mut host, clock.run_for(half));

    play_button.press()?;
    accumulate(&mut host, clock.run_until_idle(DRAIN_LIMIT));

    play_button.press()?;
    accumulate(&mut host, clock.run_for(half));

    game_loop.pause();
    accumulate(&mut host, clock.run_until_idle(DRAIN_LIMIT));

    let stats = game_loop.stats();
    println!("┌─ SUMMARY ───────────────────────────────────────────────────────┐");
    println!("│ Landing Visible:    {}", landing.is_visible());
    println!("│ Playing:            {}", play_button.is_playing());
    println!("│ Host Frames:        {}", host.frames);
    println!("│ Missed Frames:      {}", host.missed_frames);
    println!("│ Callback Errors:    {}", host.errors);
    println!("│ Loop Events:        {}", loop_ticks.load(Ordering::Relaxed));
    println!("│ Accepted Ticks:     {}", stats.accepted);
    println!("│ Throttled Ticks:    {}", stats.skipped);
    println!("│ Avg Delta:          {:.2} ms", stats.avg_delta_ms());
    println!("│ Effective Rate:     {:.2} ticks/s", stats.effective_rate());
    println!("└──────────────────────────────────────────────────────────────────┘");

    Ok(())
}

fn load_config() -> Result<CadenceConfig, Box<dyn Error>> {
    if let Some(path) = std::env::args().nth(1) {
        tracing::info!(%path, "loading config");
        return Ok(CadenceConfig::load(path)?);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        tracing::info!(path = DEFAULT_CONFIG_PATH, "loading config");
        return Ok(CadenceConfig::load(DEFAULT_CONFIG_PATH)?);
    }

    tracing::info!("no config file, using defaults");
    Ok(CadenceConfig::default())
}

fn accumulate(total: &mut FrameClockStats, run: FrameClockStats) {
    total.frames += run.frames;
    total.callbacks += run.callbacks;
    total.errors += run.errors;
    total.missed_frames += run.missed_frames;
}
