//! gnob - interactive knob driver
//!
//! Reads one input event per line from stdin and prints the resulting view:
//!
//! ```text
//! wheel <delta_y> [delta_x]   scroll over the knob
//! up | down                   arrow keys
//! type <text>                 edit the popover field
//! enter                       commit the popover field
//! dblclick | blur             popover visibility
//! quit
//! ```

use gnob::bus::{self, KnobEvent};
use gnob::config;
use gnob::control::{Key, KnobControl};
use gnob::wheel::{HostCapabilities, RawWheelEvent, WheelNormalizer, WheelSupport};

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gnob=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(
        "Starting gnob v{} ({})",
        env!("GNOB_VERSION"),
        env!("GNOB_GIT_SHA")
    );

    let config_dir = config::get_config_dir();
    let options = config::load_options(&config_dir).context("failed to load knob options")?;
    tracing::info!(
        "Options loaded from {}: min={} max={} step={}",
        config_dir.display(),
        options.min,
        options.max,
        options.step
    );

    // A terminal has no DOM to probe; it speaks the standards wheel model
    let support = WheelSupport::probe(&HostCapabilities {
        has_onwheel: true,
        has_onmousewheel: false,
    });
    tracing::debug!("Wheel events bound: {:?}", support.event_names());

    let bus = bus::create_bus();
    let mut changes = bus.subscribe();
    let mut control = KnobControl::new(&options, WheelNormalizer::new(support), bus)
        .context("invalid knob options")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_view(&mut out, &control)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "wheel" => {
                let delta_y = parse_or_zero(parts.next());
                let delta_x = parse_or_zero(parts.next());
                let mut raw = RawWheelEvent::wheel(delta_x, delta_y, 0);
                control.handle_wheel(&mut raw);
            }
            "up" => control.handle_key(Key::ArrowUp),
            "down" => control.handle_key(Key::ArrowDown),
            "enter" => control.handle_key(Key::Enter),
            "type" => {
                let text = line.trim_start().strip_prefix("type").unwrap_or("").trim();
                control.handle_input(text);
            }
            "dblclick" => control.handle_double_click(),
            "blur" => control.handle_blur(),
            "quit" | "exit" => break,
            other => {
                tracing::warn!("Unknown command: {}", other);
                continue;
            }
        }

        while let Ok(KnobEvent::ValueChanged { value, angle }) = changes.try_recv() {
            tracing::info!("Value changed: {} (angle {})", value, angle);
        }
        print_view(&mut out, &control)?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn parse_or_zero(token: Option<&str>) -> f64 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0.0)
}

fn print_view(out: &mut impl Write, control: &KnobControl) -> Result<()> {
    serde_json::to_writer(&mut *out, &control.view())?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
