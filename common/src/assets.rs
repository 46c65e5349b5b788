//! Assets the display needs at startup.
//!
//! # Fonts
//!
//! Panels with a smooth-font renderer load the face for each [`FontSize`]
//! from [`font_asset`]. [`EgSurface`](crate::eg_surface::EgSurface) draws with
//! the built-in mono faces from [`styles`](crate::styles) instead, which share
//! the same size classes, so the smooth fonts are still required on every
//! target but only rendered on device.

use crate::classify::{AssetPath, IconCategory, IconSize, moon_asset_path};
use crate::config::settings::truncated;
use crate::error::StartupError;
use crate::providers::AssetStore;
use crate::surface::FontSize;

/// Small UI font.
pub const SMALL_FONT_PATH: &str = "/fonts/NSBold15.vlw";

/// Large UI font.
pub const LARGE_FONT_PATH: &str = "/fonts/NSBold36.vlw";

/// Smooth font backing a size class. Medium text is set in the small face.
#[inline]
pub const fn font_asset(size: FontSize) -> &'static str {
    match size {
        FontSize::Small | FontSize::Medium => SMALL_FONT_PATH,
        FontSize::Large => LARGE_FONT_PATH,
    }
}

/// Every asset path the widgets may reference: the font of each size class,
/// each icon in both sizes and all eight moon phases.
pub fn required_assets() -> impl Iterator<Item = AssetPath> {
    let fonts = [FontSize::Small, FontSize::Large].into_iter().map(|size| truncated(font_asset(size)));
    let icons = IconCategory::ALL
        .into_iter()
        .flat_map(|icon| [icon.asset_path(IconSize::Large), icon.asset_path(IconSize::Small)]);
    let moons = (0..8).map(moon_asset_path);
    fonts.chain(icons).chain(moons)
}

/// Fail on the first required asset `store` does not hold.
pub fn check_assets<A: AssetStore + ?Sized>(store: &A) -> Result<(), StartupError> {
    for path in required_assets() {
        if !store.contains(&path) {
            log::error!("required asset missing: {path}");
            return Err(StartupError::MissingAsset(path));
        }
    }
    Ok(())
}
