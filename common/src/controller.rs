//! Top-level control loop.
//!
//! [`Dashboard`] owns the layout, the snapshot store, the rendered state and
//! the cadences. The platform calls [`Dashboard::startup`] once and then
//! [`Dashboard::tick`] from its main loop with a monotonic millisecond time.
//!
//! # One Tick
//!
//! 1. Clock check: redraw the Time region if the displayed minute or date
//!    moved, and flip the current icon or moon phase if they rolled over.
//! 2. At most one fetch (primary before UV). The spinner goes up before the
//!    blocking call, then detection and rendering run for that source's
//!    regions only.
//! 3. Spinner: advance while a source is not valid, wipe once both are.

use embedded_graphics::primitives::Rectangle;

use crate::animations::BusyIndicator;
use crate::assets::check_assets;
use crate::config::timing::{ANIMATION_INTERVAL_MS, CLOCK_INTERVAL_MS};
use crate::config::{Layout, RegionId, Settings, compute_layout, verify_no_overlap};
use crate::detect::{Observation, detect};
use crate::error::{FetchError, StartupError};
use crate::orchestrator::render_dirty;
use crate::providers::{AssetStore, Clock, FetchRequest, ForecastProvider, UvProvider};
use crate::render::{DirtySet, RenderedState};
use crate::scheduler::{Cadence, Scheduler, Source, fetch_with_retry};
use crate::snapshot::{SnapshotStore, UvReading, UvSnapshot};
use crate::surface::RenderSurface;
use crate::timefmt::{datetime_from_unix, format_hm};
use crate::widgets::{RenderContext, spinner_rect};

/// Result of one fetch attempt within a tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FetchReport {
    pub source: Source,
    pub result: Result<(), FetchError>,
}

/// What a tick did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TickOutcome {
    pub fetch: Option<FetchReport>,
    /// Regions redrawn and committed.
    pub drawn: DirtySet,
}

/// The weather display.
pub struct Dashboard {
    settings: Settings,
    layout: Layout,
    store: SnapshotStore,
    rendered: RenderedState,
    scheduler: Scheduler,
    clock_cadence: Cadence,
    animation_cadence: Cadence,
    busy: BusyIndicator,
    screen_cleared: bool,
}

impl Dashboard {
    /// Compute and verify the layout and check every asset. Nothing is drawn
    /// on failure.
    pub fn startup<A: AssetStore + ?Sized>(
        settings: Settings,
        width: u32,
        height: u32,
        assets: &A,
    ) -> Result<Self, StartupError> {
        let layout = compute_layout(width, height);
        if !verify_no_overlap(&layout) {
            let (a, b) = layout.find_overlap().unwrap_or((RegionId::Time, RegionId::Time));
            return Err(StartupError::LayoutOverlap { a, b });
        }
        check_assets(assets)?;

        log::info!(
            "weather display {}x{} ready: {} units, primary every {}s, uv every {}s",
            width,
            height,
            settings.units.as_str(),
            settings.primary_interval_ms / 1000,
            settings.uv_interval_ms / 1000
        );

        Ok(Self {
            scheduler: Scheduler::new(settings.primary_interval_ms, settings.uv_interval_ms),
            settings,
            layout,
            store: SnapshotStore::new(),
            rendered: RenderedState::new(),
            clock_cadence: Cadence::new(CLOCK_INTERVAL_MS),
            animation_cadence: Cadence::new(ANIMATION_INTERVAL_MS),
            busy: BusyIndicator::new(),
            screen_cleared: false,
        })
    }

    #[inline]
    pub const fn layout(&self) -> &Layout { &self.layout }

    #[inline]
    pub const fn store(&self) -> &SnapshotStore { &self.store }

    #[inline]
    pub const fn rendered(&self) -> &RenderedState { &self.rendered }

    #[inline]
    pub const fn settings(&self) -> &Settings { &self.settings }

    #[inline]
    pub const fn is_busy(&self) -> bool { self.busy.is_active() }

    /// Run one pass of the control loop.
    pub fn tick<S, P, U, C>(
        &mut self,
        now_ms: u64,
        surface: &mut S,
        primary: &mut P,
        uv: &mut U,
        clock: &C,
    ) -> TickOutcome
    where
        S: RenderSurface + ?Sized,
        P: ForecastProvider + ?Sized,
        U: UvProvider + ?Sized,
        C: Clock,
    {
        let mut outcome = TickOutcome::default();

        if !self.screen_cleared {
            surface.clear_rect(self.layout.geometry().screen());
            self.screen_cleared = true;
        }

        if self.clock_cadence.is_due(now_ms) {
            self.clock_cadence.mark(now_ms);
            outcome.drawn = outcome.drawn.union(self.refresh(surface, clock, DirtySet::CLOCK_DRIVEN));
        }

        if let Some(source) = self.scheduler.next_due(now_ms) {
            self.scheduler.mark_attempt(source, now_ms);
            let spinner = self.spinner();
            self.busy.start(surface, spinner);

            let result = match source {
                Source::Primary => self.fetch_primary(primary),
                Source::Uv => self.fetch_uv(uv, clock),
            };
            match result {
                Ok(()) => log::info!("{} fetch ok", source.name()),
                Err(err) => log::warn!("{} fetch failed: {err}", source.name()),
            }

            // A UV provider error changes the store too (N/A)
            let sections = match source {
                Source::Primary => DirtySet::PRIMARY,
                Source::Uv => DirtySet::UV,
            };
            if result.is_ok() || (source == Source::Uv && matches!(result, Err(e) if e.invalidates())) {
                outcome.drawn = outcome.drawn.union(self.refresh(surface, clock, sections));
            }
            outcome.fetch = Some(FetchReport { source, result });
        }

        self.animate(now_ms, surface);
        outcome
    }

    /// Detect and redraw `sections`.
    fn refresh<S, C>(
        &mut self,
        surface: &mut S,
        clock: &C,
        sections: DirtySet,
    ) -> DirtySet
    where
        S: RenderSurface + ?Sized,
        C: Clock,
    {
        let obs = Observation::gather(&self.store, clock);
        let first = self.rendered.committed().intersect(sections).is_empty();
        let dirty = detect(&obs, &self.rendered, sections, first);
        if dirty.is_empty() {
            log::debug!("nothing changed in {sections:?}");
            return dirty;
        }
        let ctx = RenderContext {
            layout: &self.layout,
            units: self.settings.units,
            use_24h: self.settings.use_24h,
            clock,
        };
        render_dirty(surface, &ctx, &self.store, &obs, &mut self.rendered, dirty)
    }

    fn fetch_primary<P: ForecastProvider + ?Sized>(
        &mut self,
        provider: &mut P,
    ) -> Result<(), FetchError> {
        let request = FetchRequest::forecast(&self.settings);
        let snapshot = fetch_with_retry(Source::Primary, self.settings.retries, || provider.fetch_forecast(&request))?;
        if !snapshot.is_plausible(self.settings.units) {
            log::warn!("discarding implausible temperature {}", snapshot.temperature);
            return Err(FetchError::Implausible);
        }
        self.store.replace_conditions(snapshot);
        Ok(())
    }

    fn fetch_uv<U: UvProvider + ?Sized, C: Clock>(
        &mut self,
        provider: &mut U,
        clock: &C,
    ) -> Result<(), FetchError> {
        let request = FetchRequest::uv(&self.settings);
        let now = clock.now_utc().unix_timestamp();
        match fetch_with_retry(Source::Uv, self.settings.retries, || provider.fetch_uv(&request)) {
            Ok(reading) => {
                let snapshot = self.uv_snapshot(&reading, clock, now);
                self.store.replace_uv(snapshot);
                Ok(())
            }
            Err(err) => {
                if err.invalidates() {
                    self.store.invalidate_uv(now);
                }
                Err(err)
            }
        }
    }

    fn uv_snapshot<C: Clock>(
        &self,
        reading: &UvReading,
        clock: &C,
        now: i64,
    ) -> UvSnapshot {
        let local = clock.to_local(datetime_from_unix(reading.max_time_utc));
        UvSnapshot {
            current: reading.current,
            max: reading.max,
            max_time_label: format_hm(local.time(), self.settings.use_24h),
            valid: reading.max >= 0.0,
            updated_at: now,
        }
    }

    fn spinner(&self) -> Rectangle {
        spinner_rect(self.layout.region(RegionId::Time), self.layout.geometry().pad)
    }

    fn animate<S: RenderSurface + ?Sized>(
        &mut self,
        now_ms: u64,
        surface: &mut S,
    ) {
        let spinner = self.spinner();
        if self.store.all_valid() {
            self.busy.stop(surface, spinner);
            return;
        }
        self.busy.start(surface, spinner);
        if self.animation_cadence.is_due(now_ms) {
            self.animation_cadence.mark(now_ms);
            self.busy.advance(surface, spinner);
        }
    }
}
