//! Weather Display Simulator for Windows/Desktop.
//!
//! Runs the shared dashboard against a window from the
//! embedded-graphics-simulator crate, with synthetic providers.
//!
//! # Keys
//!
//! - `F`: toggle a primary provider outage
//! - `U`: cycle the UV provider through live, timeout and rejected
//!
//! Pass `--missing <asset path>` to start with an asset knocked out and see
//! the startup failure screen.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod assets;
mod clock;
mod demo;
mod timing;

use std::env;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use env_logger::Env;
use weather_common::colors::BLACK;
use weather_common::screens::draw_fatal;
use weather_common::{Dashboard, EgSurface, Settings};

use crate::assets::BuiltinAssets;
use crate::clock::{SystemClock, offset_from_env};
use crate::demo::{DemoForecast, DemoUv};
use crate::timing::{DEMO_PRIMARY_INTERVAL_MS, DEMO_UV_INTERVAL_MS, FRAME_TIME};

const SCREEN_WIDTH: u32 = 480;
const SCREEN_HEIGHT: u32 = 320;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let missing = env::args().skip_while(|a| a != "--missing").nth(1);
    let assets = BuiltinAssets::new(missing);
    let offset = offset_from_env();
    let settings = Settings {
        primary_interval_ms: DEMO_PRIMARY_INTERVAL_MS,
        uv_interval_ms: DEMO_UV_INTERVAL_MS,
        ..Settings::default()
    };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Weather Display Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let mut dashboard = match Dashboard::startup(settings, SCREEN_WIDTH, SCREEN_HEIGHT, &assets) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            draw_fatal(&mut display, &err);
            idle(&display, &mut window);
            return;
        }
    };

    let clock = SystemClock::new(offset);
    let mut primary = DemoForecast::new(offset);
    let mut uv = DemoUv::new(offset);
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::F => {
                            let down = primary.toggle_outage();
                            log::info!("primary outage {}", if down { "on" } else { "off" });
                        }
                        Keycode::U => log::info!("uv mode: {:?}", uv.cycle_mode()),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let now_ms = started.elapsed().as_millis() as u64;
        let mut surface = EgSurface::new(&mut display);
        let outcome = dashboard.tick(now_ms, &mut surface, &mut primary, &mut uv, &clock);
        if !outcome.drawn.is_empty() {
            log::debug!("tick {now_ms}ms drew {:?}", outcome.drawn);
        }

        window.update(&display);

        // Frame timing
        let elapsed = frame_start.elapsed();
        if let Some(rest) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(rest);
        }
    }
}

/// Keep the window alive until it is closed.
fn idle(
    display: &SimulatorDisplay<Rgb565>,
    window: &mut Window,
) {
    loop {
        window.update(display);
        if window.events().any(|ev| matches!(ev, SimulatorEvent::Quit)) {
            return;
        }
        thread::sleep(FRAME_TIME);
    }
}
