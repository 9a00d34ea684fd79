//! Hexabounce headless runner
//!
//! Usage: `hexabounce [SETTINGS_JSON] [TICKS]`
//!
//! Runs the simulation without a window, logging a summary periodically and
//! printing the final state as JSON on stdout. Set `RUST_LOG` for more detail.

use std::path::PathBuf;
use std::process::ExitCode;

use hexabounce::Settings;
use hexabounce::sim::{SimState, TickInput, TickReport, tick};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Hexabounce (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> hexabounce::Result<()> {
    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let mut settings = Settings::load_or_default(settings_path.as_deref());

    if let Some(ticks) = args.next() {
        match ticks.parse() {
            Ok(ticks) => settings.host.ticks = ticks,
            Err(_) => log::warn!("Ignoring invalid tick count {ticks:?}"),
        }
    }

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = SimState::new(&settings, seed)?;
    log::info!(
        "{} preset, {} bodies, seed {seed}, {} ticks",
        settings.preset.as_str(),
        state.bodies.len(),
        settings.host.ticks
    );

    let host = settings.host;
    let mut totals = TickReport::default();
    for t in 1..=host.ticks {
        let input = TickInput {
            add_bodies: u32::from(host.add_every > 0 && t % host.add_every == 0),
            ..Default::default()
        };
        let report = tick(&mut state, &input)?;
        totals.merge(&report);

        if host.report_every > 0 && t % host.report_every == 0 {
            log::info!(
                "tick {t}: {} bodies, heading {:.3}, energy {:.2}, wall hits {}, pair contacts {}",
                state.bodies.len(),
                state.container.heading(),
                state.kinetic_energy(),
                totals.wall_hits,
                totals.pair_contacts
            );
        }
    }

    if totals.degenerate_skips > 0 {
        log::warn!("Skipped {} degenerate contacts", totals.degenerate_skips);
    }

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize state: {e}"),
    }
    Ok(())
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
