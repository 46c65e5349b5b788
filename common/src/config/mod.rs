//! Layout, timing and station configuration.
//!
//! - [`layout`]: proportional region geometry and the overlap check
//! - [`timing`]: fetch and redraw cadences, network bounds
//! - [`settings`]: station settings, units and UI strings

pub mod layout;
pub mod settings;
pub mod timing;

pub use layout::{Layout, REGION_COUNT, RegionId, ScreenGeometry, compute_layout, verify_no_overlap};
pub use settings::{Settings, Units};
pub use timing::*;
