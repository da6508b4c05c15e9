//! Monitor model: physical bounds, scale factor, and norm-unit projection.
//!
//! Physical coordinates are device pixels in the virtual-desktop space the OS
//! reports (the primary monitor's top-left is usually `(0, 0)`, other
//! monitors may sit at negative offsets).  Norm units divide those pixels by
//! the monitor's scale factor so that equal norm distances look equally tall
//! on every monitor.

use thiserror::Error;

/// The platform's reference DPI.  A monitor running at this DPI has scale 1.0.
pub const REFERENCE_DPI: u32 = 96;

/// Errors raised while building the monitor topology.
///
/// All of these are startup errors: without a valid pair there is no seam to
/// watch, so the host must not start event processing.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    /// A display reported zero/negative height or a non-positive scale.
    #[error(
        "degenerate monitor [{left},{top} - {right},{bottom}] with scale {scale}"
    )]
    DegenerateMonitor {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        scale: f64,
    },

    /// Fewer than two usable displays were found.
    #[error("at least 2 usable monitors are required, found {found}")]
    InsufficientDisplays { found: usize },

    /// An explicitly selected monitor index does not exist.
    #[error("monitor index {index} is out of range ({available} monitors available)")]
    InvalidSelection { index: usize, available: usize },

    /// The same monitor was selected as both left and right.
    #[error("left and right monitor selections refer to the same monitor")]
    IdenticalSelection,
}

/// A rectangle in device pixels, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalBounds {
    pub left: i32,
    pub top: i32,
    /// Exclusive.
    pub right: i32,
    /// Exclusive.
    pub bottom: i32,
}

impl PhysicalBounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// One display as reported by the platform enumerator, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    /// Platform device name (e.g. `\\.\DISPLAY1`); may be empty.
    pub name: String,
    pub bounds: PhysicalBounds,
    /// Effective DPI divided by [`REFERENCE_DPI`].
    pub scale: f64,
}

impl DisplayRecord {
    pub fn new(name: impl Into<String>, bounds: PhysicalBounds, scale: f64) -> Self {
        Self {
            name: name.into(),
            bounds,
            scale,
        }
    }

    /// Builds a record from an effective DPI value as returned by the platform.
    ///
    /// A DPI of zero means the platform could not report one; the scale then
    /// falls back to 1.0.
    pub fn from_dpi(name: impl Into<String>, bounds: PhysicalBounds, dpi: u32) -> Self {
        let scale = if dpi == 0 {
            1.0
        } else {
            f64::from(dpi) / f64::from(REFERENCE_DPI)
        };
        Self::new(name, bounds, scale)
    }
}

/// A validated monitor with its norm-unit projection.
///
/// Immutable once built; replacing the scale produces a new value via
/// [`Monitor::with_scale`].
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    name: String,
    bounds: PhysicalBounds,
    scale: f64,
    norm_top: f64,
    norm_height: f64,
}

impl Monitor {
    /// Builds a monitor, deriving `norm_top` and `norm_height` from the scale.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DegenerateMonitor`] if the height is not
    /// positive or the scale is not a finite positive number.
    pub fn new(
        name: impl Into<String>,
        bounds: PhysicalBounds,
        scale: f64,
    ) -> Result<Self, TopologyError> {
        if bounds.height() <= 0 || !scale.is_finite() || scale <= 0.0 {
            return Err(TopologyError::DegenerateMonitor {
                left: bounds.left,
                top: bounds.top,
                right: bounds.right,
                bottom: bounds.bottom,
                scale,
            });
        }

        Ok(Self {
            name: name.into(),
            bounds,
            scale,
            norm_top: f64::from(bounds.top) / scale,
            norm_height: f64::from(bounds.height()) / scale,
        })
    }

    /// Validates a raw [`DisplayRecord`].
    ///
    /// # Errors
    ///
    /// See [`Monitor::new`].
    pub fn from_record(record: &DisplayRecord) -> Result<Self, TopologyError> {
        Self::new(record.name.clone(), record.bounds, record.scale)
    }

    /// Returns a copy of this monitor with a different scale factor and the
    /// norm projection recomputed.
    ///
    /// # Errors
    ///
    /// See [`Monitor::new`].
    pub fn with_scale(&self, scale: f64) -> Result<Self, TopologyError> {
        Self::new(self.name.clone(), self.bounds, scale)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> PhysicalBounds {
        self.bounds
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Top edge in norm units (`physical_top / scale`).
    pub fn norm_top(&self) -> f64 {
        self.norm_top
    }

    /// Height in norm units (`physical_height / scale`). Always > 0.
    pub fn norm_height(&self) -> f64 {
        self.norm_height
    }

    /// Converts a physical Y coordinate to norm units on this monitor.
    pub fn to_norm(&self, physical_y: i32) -> f64 {
        f64::from(physical_y) / self.scale
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
