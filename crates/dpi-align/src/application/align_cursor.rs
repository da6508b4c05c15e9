//! Align Cursor use case.
//!
//! Consumes raw input events from the capture hook and decides, per mouse
//! move, whether the OS should apply it or whether the cursor has been warped
//! to a DPI-corrected landing point instead.
//!
//! # Flow per mouse move (for beginners)
//!
//! 1. The [`CrossingDetector`] compares the sample with the previous one.
//! 2. On a crossing, [`compute_landing`] maps the height the user left at
//!    onto the destination monitor.
//! 3. The [`CursorRelocator`] warps the cursor there and arms suppression
//!    for the echo that the warp itself produces.
//! 4. The original event is swallowed ([`SampleDecision::Consume`]).
//!
//! Every other sample passes through untouched ([`SampleDecision::Ignore`]).
//!
//! # Hotkeys
//!
//! A toggle key (ScrollLock by default) switches alignment on and off at
//! runtime.  While off, crossings are still tracked so that turning alignment
//! back on never acts on a stale baseline.  An optional reload key re-runs
//! monitor discovery after the display layout changes.
//!
//! Both keys act on the press edge only: auto-repeat `KeyDown` events that
//! arrive while the key is held are ignored until the matching `KeyUp`.

use std::collections::HashSet;
use std::sync::Arc;

use dpi_align_core::{
    compute_landing, AlignMode, CrossingDetector, CursorSample, MonitorPair, Observation,
    PairSelection, SampleDecision,
};
use tracing::{debug, info, trace, warn};

use crate::application::discover_monitors::{discover, DiscoveryError, DisplayEnumerator};
use crate::application::relocate_cursor::{CursorMover, CursorRelocator};
use crate::infrastructure::input_capture::RawInputEvent;

/// Virtual-key code of ScrollLock, the default toggle key.
pub const DEFAULT_TOGGLE_VK: u8 = 0x91;

/// Where a reload gets its monitors from.
struct MonitorSource {
    enumerator: Arc<dyn DisplayEnumerator>,
    selection: PairSelection,
}

/// The Align Cursor use case.
pub struct AlignCursorUseCase {
    pair: MonitorPair,
    detector: CrossingDetector,
    relocator: CursorRelocator,
    mode: AlignMode,
    enabled: bool,
    toggle_vk: Option<u8>,
    reload_vk: Option<u8>,
    source: Option<MonitorSource>,
    /// Keys currently down, for edge detection.
    held_keys: HashSet<u8>,
}

impl AlignCursorUseCase {
    /// Creates the use case with alignment enabled and the default toggle key.
    pub fn new(pair: MonitorPair, mover: Arc<dyn CursorMover>, mode: AlignMode) -> Self {
        let detector = CrossingDetector::new(pair.boundary_x());
        Self {
            pair,
            detector,
            relocator: CursorRelocator::new(mover),
            mode,
            enabled: true,
            toggle_vk: Some(DEFAULT_TOGGLE_VK),
            reload_vk: None,
            source: None,
            held_keys: HashSet::new(),
        }
    }

    /// Sets the toggle key.  `None` disables runtime toggling.
    pub fn with_toggle_key(mut self, vk: Option<u8>) -> Self {
        self.toggle_vk = vk;
        self
    }

    /// Sets the key that triggers [`Self::reload_monitors`].
    pub fn with_reload_key(mut self, vk: Option<u8>) -> Self {
        self.reload_vk = vk;
        self
    }

    /// Remembers how the current pair was discovered so it can be rebuilt.
    pub fn with_monitor_source(
        mut self,
        enumerator: Arc<dyn DisplayEnumerator>,
        selection: PairSelection,
    ) -> Self {
        self.source = Some(MonitorSource {
            enumerator,
            selection,
        });
        self
    }

    pub fn pair(&self) -> &MonitorPair {
        &self.pair
    }

    pub fn mode(&self) -> AlignMode {
        self.mode
    }

    pub fn toggle_key(&self) -> Option<u8> {
        self.toggle_vk
    }

    pub fn reload_key(&self) -> Option<u8> {
        self.reload_vk
    }

    pub fn detector(&self) -> &CrossingDetector {
        &self.detector
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!(enabled, "cursor alignment toggled");
        }
        self.enabled = enabled;
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Swaps in a freshly discovered pair and forgets all tracking state.
    pub fn replace_monitors(&mut self, pair: MonitorPair) {
        info!(
            left = %pair.left().name(),
            right = %pair.right().name(),
            boundary_x = pair.boundary_x(),
            "monitor pair replaced"
        );
        self.detector.reset(pair.boundary_x());
        self.pair = pair;
    }

    /// Re-runs discovery with the configured source and selection.
    ///
    /// Returns `Ok(false)` when no source was configured.  On error the
    /// current pair stays in place.
    ///
    /// # Errors
    ///
    /// Propagates the [`DiscoveryError`] from [`discover`].
    pub fn reload_monitors(&mut self) -> Result<bool, DiscoveryError> {
        let Some(source) = &self.source else {
            return Ok(false);
        };
        let pair = discover(source.enumerator.as_ref(), &source.selection)?;
        self.replace_monitors(pair);
        Ok(true)
    }

    /// Dispatches one raw event from the capture hook.
    pub fn handle_event(&mut self, event: RawInputEvent) -> SampleDecision {
        match event {
            RawInputEvent::MouseMove { x, y, .. } => self.on_cursor_sample(x, y),
            RawInputEvent::KeyDown { vk_code, .. } => {
                self.on_key_down(vk_code);
                SampleDecision::Ignore
            }
            RawInputEvent::KeyUp { vk_code, .. } => {
                self.on_key_up(vk_code);
                SampleDecision::Ignore
            }
        }
    }

    /// Handles a key press.  The key itself is never swallowed, and
    /// auto-repeats of a held key are ignored.
    pub fn on_key_down(&mut self, vk_code: u8) {
        if !self.held_keys.insert(vk_code) {
            return;
        }
        if self.toggle_vk == Some(vk_code) {
            self.toggle();
        } else if self.reload_vk == Some(vk_code) {
            match self.reload_monitors() {
                Ok(true) => {}
                Ok(false) => debug!("reload key pressed but no monitor source is configured"),
                Err(e) => warn!(error = %e, "monitor reload failed; keeping the current pair"),
            }
        }
    }

    /// Handles a key release, re-arming the key for its next press.
    pub fn on_key_up(&mut self, vk_code: u8) {
        self.held_keys.remove(&vk_code);
    }

    /// Processes one cursor sample in device pixels.
    pub fn on_cursor_sample(&mut self, x: i32, y: i32) -> SampleDecision {
        let sample = CursorSample::new(x, y);
        trace!(x, y, "cursor sample");

        let crossing = match self.detector.observe(sample) {
            Observation::Crossed(crossing) => crossing,
            Observation::Suppressed => {
                trace!(x, y, "relocation echo suppressed");
                return SampleDecision::Ignore;
            }
            Observation::Baseline | Observation::NoCrossing => return SampleDecision::Ignore,
        };

        if !self.enabled {
            self.detector.rebase(sample);
            return SampleDecision::Ignore;
        }

        let landing = compute_landing(&self.pair, &crossing, self.mode);
        let target = CursorSample::new(landing.x, landing.y);

        match self.relocator.relocate(&mut self.detector, target) {
            Ok(()) => {
                debug!(
                    direction = ?crossing.direction,
                    from_x = crossing.from.x,
                    from_y = crossing.from.y,
                    raw_x = crossing.to.x,
                    raw_y = crossing.to.y,
                    source_y_norm = landing.mapped.source_y_norm,
                    relative = landing.mapped.relative,
                    dest_y_norm = landing.mapped.dest_y_norm,
                    to_x = landing.x,
                    to_y = landing.y,
                    "seam crossing aligned"
                );
                SampleDecision::Consume
            }
            Err(e) => {
                warn!(error = %e, "cursor relocation failed; letting the native move through");
                self.detector.rebase(sample);
                SampleDecision::Ignore
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
