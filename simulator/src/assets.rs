//! Built-in asset store.
//!
//! The simulator draws icons and moon phases as vector glyphs and uses mono
//! fonts, so every required asset is present unless one is knocked out from
//! the command line to exercise the startup failure screen.

use weather_common::AssetStore;
use weather_common::assets::required_assets;

pub struct BuiltinAssets {
    missing: Option<String>,
}

impl BuiltinAssets {
    pub const fn new(missing: Option<String>) -> Self { Self { missing } }
}

impl AssetStore for BuiltinAssets {
    fn contains(
        &self,
        path: &str,
    ) -> bool {
        if self.missing.as_deref() == Some(path) {
            return false;
        }
        required_assets().any(|p| p == path)
    }
}

#[cfg(test)]
mod tests {
    use weather_common::assets::check_assets;

    use super::*;

    #[test]
    fn test_complete_store_passes() {
        assert!(check_assets(&BuiltinAssets::new(None)).is_ok());
    }

    #[test]
    fn test_knocked_out_asset_fails() {
        let store = BuiltinAssets::new(Some("/moon/moonphase_L3.bmp".into()));
        assert!(check_assets(&store).is_err());
    }
}
