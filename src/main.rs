//! Headless campus tour: flies the camera to every building in menu order
//! and logs where it lands.

use std::path::Path;

use campus_map::camera::core::Viewport;
use campus_map::options::CampusOptions;
use campus_map::CampusMap;
use web_time::{Duration, Instant};

/// Simulated display refresh.
const FRAME: Duration = Duration::from_micros(16_667);

/// Upper bound on frames per leg, in case a flight never settles.
const MAX_FRAMES_PER_LEG: u32 = 60 * 30;

fn load_options(arg: Option<&str>) -> Result<CampusOptions, String> {
    match arg {
        Some(path) => CampusOptions::load(Path::new(path))
            .map_err(|e| format!("failed to load {path}: {e}")),
        None => Ok(CampusOptions::default()),
    }
}

/// Fly to every building in menu order and log where the camera lands.
fn tour(map: &mut CampusMap, start: Instant) -> Result<Instant, String> {
    let ids: Vec<String> =
        map.registry().ids().map(str::to_owned).collect();
    let mut now = start;

    for id in ids {
        let destination = map
            .navigate_to(&id, now)
            .map_err(|e| format!("navigation to '{id}' failed: {e}"))?;
        let mut frames = 0;
        loop {
            now += FRAME;
            frames += 1;
            let report = map.frame(now);
            if let Some(fault) = report.fault {
                log::warn!("frame {}: {fault}", report.frame);
            }
            if report.flying_to.is_none() || frames >= MAX_FRAMES_PER_LEG {
                break;
            }
        }

        let state = map.camera_state();
        if destination == state {
            log::info!(
                "{id}: landed after {frames} frames at {} looking at {}",
                state.position,
                state.orbit_target
            );
        } else {
            log::warn!(
                "{id}: ended at {} instead of {}",
                state.position,
                destination.position
            );
        }
    }
    Ok(now)
}

fn main() {
    env_logger::init();

    let arg = std::env::args().nth(1);
    let options = match load_options(arg.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: campus-tour [options.toml]");
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let mut map = match CampusMap::new(options, Viewport::default(), start) {
        Ok(map) => map,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    match tour(&mut map, start) {
        Ok(end) => log::info!(
            "tour finished: {} frames, {:.1}s simulated",
            map.frame_count(),
            end.duration_since(start).as_secs_f32()
        ),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
