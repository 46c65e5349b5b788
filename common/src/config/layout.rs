//! Proportional screen layout.
//!
//! The screen is split into seven named regions whose edges are fixed
//! fractions of the panel size, so the same firmware runs on a 320x240 and a
//! 480x320 panel without per-device constants:
//!
//! ```text
//! ┌──────────────────┬──────────────────┐  0
//! │ Time             │ Astronomy        │
//! ├──────────────────┤                  │  16% H
//! │ CurrentConditions├──────────────────┤  30% H
//! │                  │ Forecast         │
//! ├──────────────────┼──────────────────┤  52% H
//! │ UvBand           │ PrecipitationGr. │
//! ├──────────────────┴──────────────────┤  66% H
//! │ TemperatureGraph                    │
//! └─────────────────────────────────────┘  H
//!                    ^ W / 2
//! ```
//!
//! # Optimization: Computed Once
//!
//! [`ScreenGeometry`] and every region rectangle are computed once at startup
//! by [`compute_layout`] and threaded through all render calls. Nothing here
//! runs per frame.
//!
//! # No Frame Buffer
//!
//! The panel has no frame buffer to repair a bad erase, so two regions must
//! never overlap: clearing one would wipe part of the other with no way to
//! notice. [`verify_no_overlap`] checks this before the first draw call.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Region Identifiers
// =============================================================================

/// Number of named regions on the screen.
pub const REGION_COUNT: usize = 7;

/// Named screen regions. Each is also the unit of change detection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum RegionId {
    /// Clock and date, top-left.
    Time = 0,
    /// Current temperature, icon and description.
    CurrentConditions = 1,
    /// Single UV index line under the current conditions.
    UvBand = 2,
    /// Sunrise/sunset, wind, cloud, humidity, moon phase.
    Astronomy = 3,
    /// Four-day forecast columns.
    Forecast = 4,
    /// Precipitation probability bars.
    PrecipitationGraph = 5,
    /// Hourly temperature line graph across the bottom.
    TemperatureGraph = 6,
}

impl RegionId {
    /// Every region, in index order.
    pub const ALL: [Self; REGION_COUNT] = [
        Self::Time,
        Self::CurrentConditions,
        Self::UvBand,
        Self::Astronomy,
        Self::Forecast,
        Self::PrecipitationGraph,
        Self::TemperatureGraph,
    ];

    /// Array index of this region.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Short name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::CurrentConditions => "conditions",
            Self::UvBand => "uv",
            Self::Astronomy => "astronomy",
            Self::Forecast => "forecast",
            Self::PrecipitationGraph => "precip-graph",
            Self::TemperatureGraph => "temp-graph",
        }
    }
}

impl core::fmt::Display for RegionId {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Region pairs that share an edge. These are the pairs where an off-by-one
/// in the fractions would first show up as an overlap.
pub const ADJACENT_PAIRS: [(RegionId, RegionId); 7] = [
    (RegionId::Time, RegionId::CurrentConditions),
    (RegionId::CurrentConditions, RegionId::UvBand),
    (RegionId::UvBand, RegionId::TemperatureGraph),
    (RegionId::Forecast, RegionId::PrecipitationGraph),
    (RegionId::PrecipitationGraph, RegionId::TemperatureGraph),
    // Left/right split
    (RegionId::Time, RegionId::Astronomy),
    (RegionId::UvBand, RegionId::PrecipitationGraph),
];

// =============================================================================
// Screen Geometry
// =============================================================================

/// Panel size plus the proportional constants derived from it.
///
/// All fields are pure functions of `width` and `height`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
    /// X coordinate of the left/right column split.
    pub split_x: u32,
    /// Bottom edge of the time region.
    pub time_bottom: u32,
    /// Bottom edge of the astronomy region.
    pub astronomy_bottom: u32,
    /// Bottom edge of the current conditions and forecast regions.
    pub conditions_bottom: u32,
    /// Bottom edge of the UV band and precipitation graph; top of the bottom graph.
    pub band_bottom: u32,
    /// Inner padding used inside every region.
    pub pad: u32,
}

impl ScreenGeometry {
    /// Derive all layout constants from the panel size.
    pub const fn new(
        width: u32,
        height: u32,
    ) -> Self {
        let pad = width / 80;
        Self {
            width,
            height,
            split_x: width / 2,
            time_bottom: frac(height, 16),
            astronomy_bottom: frac(height, 30),
            conditions_bottom: frac(height, 52),
            band_bottom: frac(height, 66),
            pad: if pad == 0 { 1 } else { pad },
        }
    }

    /// Whole screen as a rectangle.
    #[inline]
    pub const fn screen(&self) -> Rectangle { Rectangle::new(Point::zero(), Size::new(self.width, self.height)) }
}

/// `percent`% of `value`, rounded down. Widened to u64 so large panels cannot overflow.
#[inline]
const fn frac(
    value: u32,
    percent: u32,
) -> u32 {
    (value as u64 * percent as u64 / 100) as u32
}

#[inline]
const fn rect(
    x: u32,
    y: u32,
    w: u32,
    h: u32,
) -> Rectangle {
    Rectangle::new(Point::new(x as i32, y as i32), Size::new(w, h))
}

// =============================================================================
// Layout
// =============================================================================

/// The set of region rectangles for one panel size.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Layout {
    geometry: ScreenGeometry,
    regions: [Rectangle; REGION_COUNT],
}

impl Layout {
    /// Build a layout from explicit rectangles (tests and diagnostics).
    pub const fn from_parts(
        geometry: ScreenGeometry,
        regions: [Rectangle; REGION_COUNT],
    ) -> Self {
        Self { geometry, regions }
    }

    #[inline]
    pub const fn geometry(&self) -> &ScreenGeometry { &self.geometry }

    #[inline]
    pub const fn region(
        &self,
        id: RegionId,
    ) -> Rectangle {
        self.regions[id.index()]
    }

    /// Iterate `(id, rectangle)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, Rectangle)> + '_ {
        RegionId::ALL.iter().map(|&id| (id, self.regions[id.index()]))
    }

    /// First pair of regions whose boxes intersect, or a region poking outside
    /// the screen (reported paired with itself).
    pub fn find_overlap(&self) -> Option<(RegionId, RegionId)> {
        let screen = self.geometry.screen();
        for (i, &a) in RegionId::ALL.iter().enumerate() {
            let ra = self.region(a);
            if !ra.is_zero_sized() && screen.intersection(&ra) != ra {
                return Some((a, a));
            }
            for &b in &RegionId::ALL[i + 1..] {
                if !ra.intersection(&self.region(b)).is_zero_sized() {
                    return Some((a, b));
                }
            }
        }
        None
    }
}

/// Partition a `width` x `height` panel into the named regions.
///
/// Pure and total: any positive size gives a layout (tiny panels give
/// zero-sized regions rather than an error).
pub fn compute_layout(
    width: u32,
    height: u32,
) -> Layout {
    let g = ScreenGeometry::new(width, height);
    let right_w = g.width - g.split_x;

    let mut regions = [Rectangle::zero(); REGION_COUNT];
    regions[RegionId::Time.index()] = rect(0, 0, g.split_x, g.time_bottom);
    regions[RegionId::CurrentConditions.index()] =
        rect(0, g.time_bottom, g.split_x, g.conditions_bottom - g.time_bottom);
    regions[RegionId::UvBand.index()] = rect(0, g.conditions_bottom, g.split_x, g.band_bottom - g.conditions_bottom);
    regions[RegionId::Astronomy.index()] = rect(g.split_x, 0, right_w, g.astronomy_bottom);
    regions[RegionId::Forecast.index()] =
        rect(g.split_x, g.astronomy_bottom, right_w, g.conditions_bottom - g.astronomy_bottom);
    regions[RegionId::PrecipitationGraph.index()] =
        rect(g.split_x, g.conditions_bottom, right_w, g.band_bottom - g.conditions_bottom);
    regions[RegionId::TemperatureGraph.index()] = rect(0, g.band_bottom, g.width, g.height - g.band_bottom);

    Layout::from_parts(g, regions)
}

/// Check that no two regions intersect and all lie on the screen.
///
/// Touching edges are fine. On failure every rectangle is logged so the bad
/// fraction can be found from a serial capture.
pub fn verify_no_overlap(layout: &Layout) -> bool {
    match layout.find_overlap() {
        None => {
            for (a, b) in ADJACENT_PAIRS {
                if !touches(&layout.region(a), &layout.region(b)) {
                    log::warn!("layout gap between {a} and {b}");
                }
            }
            true
        }
        Some((a, b)) => {
            log::error!(
                "layout overlap between {} and {} on {}x{} panel",
                a.name(),
                b.name(),
                layout.geometry().width,
                layout.geometry().height
            );
            for (id, r) in layout.iter() {
                log::error!(
                    "  {:<12} x={} y={} w={} h={}",
                    id.name(),
                    r.top_left.x,
                    r.top_left.y,
                    r.size.width,
                    r.size.height
                );
            }
            false
        }
    }
}

/// Shrink a rectangle by `pad` on every side, saturating at zero size.
pub fn inset(
    r: Rectangle,
    pad: u32,
) -> Rectangle {
    let w = r.size.width.saturating_sub(pad * 2);
    let h = r.size.height.saturating_sub(pad * 2);
    Rectangle::new(r.top_left + Point::new(pad as i32, pad as i32), Size::new(w, h))
}

/// Do two rectangles share an edge (touch without overlapping)?
pub fn touches(
    a: &Rectangle,
    b: &Rectangle,
) -> bool {
    let (ax0, ay0) = (a.top_left.x, a.top_left.y);
    let (ax1, ay1) = (ax0 + a.size.width as i32, ay0 + a.size.height as i32);
    let (bx0, by0) = (b.top_left.x, b.top_left.y);
    let (bx1, by1) = (bx0 + b.size.width as i32, by0 + b.size.height as i32);

    let x_overlap = ax0 < bx1 && bx0 < ax1;
    let y_overlap = ay0 < by1 && by0 < ay1;
    ((ax1 == bx0 || bx1 == ax0) && y_overlap) || ((ay1 == by0 || by1 == ay0) && x_overlap)
}

// =============================================================================
// Unit Tests
// =============================================================================
