//! Left/right monitor pair selection.
//!
//! Only two monitors take part in alignment.  By default they are the two
//! left-most usable displays; callers may pick others by index and override
//! either monitor's scale factor.
//!
//! The seam (`boundary_x`) is always the right monitor's physical left edge.
//! If the two monitors overlap or leave a gap, the seam stays there anyway
//! and the overlap/gap region simply behaves unevenly.

use tracing::warn;

use super::crossing::Direction;
use super::monitor::{DisplayRecord, Monitor, TopologyError};

/// Which discovered monitors form the pair, plus optional scale overrides.
///
/// Indices refer to the usable monitors sorted left to right (see
/// [`usable_monitors`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairSelection {
    /// Index of the left monitor. Defaults to 0.
    pub left_index: Option<usize>,
    /// Index of the right monitor. Defaults to 1.
    pub right_index: Option<usize>,
    /// Replaces the left monitor's discovered scale.
    pub left_scale: Option<f64>,
    /// Replaces the right monitor's discovered scale.
    pub right_scale: Option<f64>,
}

/// The two monitors taking part in alignment and the seam between them.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorPair {
    left: Monitor,
    right: Monitor,
    boundary_x: i32,
}

impl MonitorPair {
    /// Builds a pair from two monitors, ordering them by physical left edge.
    pub fn new(a: Monitor, b: Monitor) -> Self {
        let (left, right) = if a.bounds().left > b.bounds().left {
            (b, a)
        } else {
            (a, b)
        };
        let boundary_x = right.bounds().left;
        Self {
            left,
            right,
            boundary_x,
        }
    }

    /// Validates `records`, sorts them left to right and picks the pair
    /// described by `selection`.
    ///
    /// Degenerate records are dropped with a warning before indices are
    /// resolved.  Only the two chosen monitors are retained.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::InsufficientDisplays`] if fewer than two usable
    ///   monitors remain.
    /// - [`TopologyError::InvalidSelection`] if an index is out of range.
    /// - [`TopologyError::IdenticalSelection`] if both indices are equal.
    /// - [`TopologyError::DegenerateMonitor`] if a scale override is not a
    ///   finite positive number.
    pub fn select(
        records: &[DisplayRecord],
        selection: &PairSelection,
    ) -> Result<Self, TopologyError> {
        let monitors = usable_monitors(records);
        if monitors.len() < 2 {
            return Err(TopologyError::InsufficientDisplays {
                found: monitors.len(),
            });
        }

        let li = selection.left_index.unwrap_or(0);
        let ri = selection.right_index.unwrap_or(1);
        for index in [li, ri] {
            if index >= monitors.len() {
                return Err(TopologyError::InvalidSelection {
                    index,
                    available: monitors.len(),
                });
            }
        }
        if li == ri {
            return Err(TopologyError::IdenticalSelection);
        }

        let mut pair = Self::new(monitors[li].clone(), monitors[ri].clone());

        // Overrides apply to the final left/right roles, after any swap.
        if let Some(scale) = selection.left_scale {
            pair.left = pair.left.with_scale(scale)?;
        }
        if let Some(scale) = selection.right_scale {
            pair.right = pair.right.with_scale(scale)?;
        }

        if !pair.is_adjacent() {
            warn!(
                left_right = pair.left.bounds().right,
                boundary_x = pair.boundary_x,
                "selected monitors are not edge-to-edge; alignment near the seam may jump"
            );
        }

        Ok(pair)
    }

    pub fn left(&self) -> &Monitor {
        &self.left
    }

    pub fn right(&self) -> &Monitor {
        &self.right
    }

    /// Left edge of the right monitor, in device pixels.
    pub fn boundary_x(&self) -> i32 {
        self.boundary_x
    }

    /// Returns `true` when the left monitor ends exactly where the right one starts.
    pub fn is_adjacent(&self) -> bool {
        self.left.bounds().right == self.boundary_x
    }

    /// Returns `(source, destination)` for a crossing in `direction`.
    pub fn endpoints(&self, direction: Direction) -> (&Monitor, &Monitor) {
        match direction {
            Direction::LeftToRight => (&self.left, &self.right),
            Direction::RightToLeft => (&self.right, &self.left),
        }
    }
}

/// Validates every record and returns the usable monitors sorted by
/// physical left edge.
///
/// Degenerate records are logged and skipped.  The sort is stable, so
/// monitors sharing a left edge keep their enumeration order.
pub fn usable_monitors(records: &[DisplayRecord]) -> Vec<Monitor> {
    let mut monitors: Vec<Monitor> = records
        .iter()
        .filter_map(|record| match Monitor::from_record(record) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(name = %record.name, "excluding monitor: {e}");
                None
            }
        })
        .collect();
    monitors.sort_by_key(|m| m.bounds().left);
    monitors
}

// ── Tests ─────────────────────────────────────────────────────────────────────
