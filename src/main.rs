//! # Text Watch Application Entry Point
//!
//! This binary drives the watch face: it reads the wall clock once a minute,
//! steps the slide animations at the configured frame rate, and presents the
//! result. Presentation modes:
//! - default: one summary line per settled update
//! - `--stdout`: ASCII rendition of the full 144×168 frame
//! - `--json`: a JSON snapshot per settled update
//! - `--debug`: the clock is frozen and stdin commands (`up`, `down 1000`)
//!   step the minute, with auto-repeat while a button is "held"
//! - `--once`: render the current time once and exit

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chrono::Local;
use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use text_watch_lib::{
    clock::{until_next_minute, Button, ButtonRepeat, DebugCommand, TickSource},
    config::Config,
    face::WatchFace,
    framebuffer::FrameBuffer,
    renderer::{draw_ascii, draw_face},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command line switches.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    stdout: bool,
    json: bool,
    debug: bool,
    once: bool,
    config: Option<PathBuf>,
}

impl Options {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--stdout" => options.stdout = true,
                "--json" => options.json = true,
                "--debug" => options.debug = true,
                "--once" => options.once = true,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    options.config = Some(PathBuf::from(path));
                }
                other => bail!("unknown argument {:?}", other),
            }
        }
        Ok(options)
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = Options::parse(env::args().skip(1))?;

    // An explicitly named config file must load; the default one may be absent
    let config = match &options.config {
        Some(path) => Config::try_load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => Config::load(),
    };

    // Single thread: every face mutation happens on the one task below
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    rt.block_on(run(config, options))
}

async fn run(config: Config, options: Options) -> anyhow::Result<()> {
    // Without a display surface there is nothing to run
    let mut frame = FrameBuffer::new(config.display.width, config.display.height)
        .context("creating display frame")?;

    let mut face = WatchFace::new(&config);
    let mut ticks = TickSource::new();
    let first = ticks.tick(Local::now().naive_local());
    face.display_initial_time(&first.time);
    info!("started at {}", face.time());
    present(&face, &config, &options, &mut frame)?;

    if options.once {
        return Ok(());
    }

    let mut frames = tokio::time::interval(config.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    let repeat = ButtonRepeat::new(config.repeat_interval());
    let mut repeat_timer =
        tokio::time::interval(config.repeat_interval().max(Duration::from_millis(1)));
    let mut held: Option<(Button, u32)> = None;

    let mut commands = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let next_minute = tokio::time::sleep(until_next_minute(&Local::now().naive_local()));

        tokio::select! {
            _ = next_minute, if !options.debug => {
                let tick = ticks.tick(Local::now().naive_local());
                restart_frame_clock(&face, &mut last_frame, Instant::now());
                face.handle_tick(&tick);
                if !face.is_animating() {
                    present(&face, &config, &options, &mut frame)?;
                }
            }
            _ = frames.tick(), if face.is_animating() => {
                let now = Instant::now();
                let animating = face.advance(now - last_frame);
                last_frame = now;
                draw_face(&face, &config.display, &mut frame).unwrap_or_else(|never| match never {});
                if !animating {
                    present(&face, &config, &options, &mut frame)?;
                }
            }
            _ = repeat_timer.tick(), if held.is_some() => {
                if let Some((button, remaining)) = held.take() {
                    restart_frame_clock(&face, &mut last_frame, Instant::now());
                    face.press(button);
                    if remaining > 1 {
                        held = Some((button, remaining - 1));
                    }
                }
            }
            line = commands.next_line(), if options.debug => {
                let Some(line) = line.context("reading debug commands")? else {
                    info!("stdin closed, leaving debug mode");
                    break;
                };
                match line.parse::<DebugCommand>() {
                    Ok(command) => {
                        // first press fires now, repeats follow on the timer
                        restart_frame_clock(&face, &mut last_frame, Instant::now());
                        face.press(command.button);
                        let repeats = repeat.presses_for_hold(command.held).saturating_sub(1);
                        held = (repeats > 0).then_some((command.button, repeats));
                        repeat_timer.reset();
                        if !face.is_animating() {
                            present(&face, &config, &options, &mut frame)?;
                        }
                    }
                    Err(e) => warn!("{} (try up, down, up 1000)", e),
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }
    }

    Ok(())
}

/// Count animation time from `now` for a face at rest.
///
/// A running slide keeps its frame clock, so an update queued behind it does
/// not lose the time elapsed since the last frame.
fn restart_frame_clock(face: &WatchFace, last_frame: &mut Instant, now: Instant) {
    if !face.is_animating() {
        *last_frame = now;
    }
}

/// Redraw the frame and show it in the selected mode.
fn present(
    face: &WatchFace,
    config: &Config,
    options: &Options,
    frame: &mut FrameBuffer,
) -> anyhow::Result<()> {
    draw_face(face, &config.display, frame).unwrap_or_else(|never| match never {});

    if options.json {
        println!("{}", serde_json::to_string(&face.snapshot())?);
    }
    if options.stdout {
        draw_ascii(face, &config.display)?;
    }
    if !options.json && !options.stdout {
        let snapshot = face.snapshot();
        let words: Vec<&str> = snapshot
            .lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
            .collect();
        println!("{} | {} | {}", words.join(" "), snapshot.day, snapshot.date);
    }
    Ok(())
}
