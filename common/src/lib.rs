//! Core of the weather display.
//!
//! Everything here is platform-agnostic and shared between the desktop
//! simulator and device builds:
//!
//! - [`config`]: Screen layout, settings and timing constants
//! - [`snapshot`]: Provider data and the snapshot store
//! - [`detect`]: Change detection against what is on screen
//! - [`orchestrator`]: Draws dirty regions in a fixed order
//! - [`widgets`]: Per-region drawing
//! - [`controller`]: The control loop tying it all together
//! - [`providers`]: Traits the platform implements (HTTP, clock, assets)
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests. It never reads the system clock;
//! time comes in through [`providers::Clock`] and the millisecond counter
//! passed to [`Dashboard::tick`].

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animations;
pub mod assets;
pub mod astro;
pub mod classify;
pub mod colors;
pub mod config;
pub mod controller;
pub mod detect;
pub mod eg_surface;
pub mod error;
pub mod glyphs;
pub mod orchestrator;
pub mod providers;
pub mod render;
pub mod scheduler;
pub mod screens;
pub mod snapshot;
pub mod styles;
pub mod surface;
pub mod thresholds;
pub mod timefmt;
pub mod widgets;

#[cfg(test)]
mod mocks;

// Re-export commonly used items
pub use config::{Layout, RegionId, Settings, Units, compute_layout};
pub use controller::{Dashboard, FetchReport, TickOutcome};
pub use eg_surface::EgSurface;
pub use error::{FetchError, StartupError};
pub use providers::{AssetStore, Clock, FetchRequest, ForecastProvider, UvProvider};
pub use render::{DirtySet, RenderedState};
pub use scheduler::Source;
pub use snapshot::{ConditionsSnapshot, ForecastSample, UvReading};
pub use surface::{Anchor, FontSize, RenderSurface};
