//! Landing-point computation for a seam crossing.
//!
//! The vertical coordinate is mapped through norm units so that the cursor
//! keeps its perceived height; the horizontal coordinate is fixed just
//! inside the destination monitor's near edge.
//!
//! All functions here are pure.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::crossing::{Crossing, Direction};
use super::monitor::Monitor;
use super::pair::MonitorPair;

/// How far inside the destination's near edge the cursor lands, in device pixels.
///
/// Landing on the seam itself would let the next tiny movement count as a
/// crossing back.
pub const LANDING_INSET: i32 = 2;

/// Which vertical reference point is kept aligned across the seam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlignMode {
    /// Top edges line up; the relative position is clamped to `[0, 1]`.
    #[default]
    Top,
    /// Vertical centres line up; offsets from the centre scale with height.
    Center,
}

/// Error returned when parsing an [`AlignMode`] from text.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid alignment mode '{0}': expected 'top' or 'center'")]
pub struct ParseAlignModeError(String);

impl FromStr for AlignMode {
    type Err = ParseAlignModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(AlignMode::Top),
            "center" | "centre" => Ok(AlignMode::Center),
            _ => Err(ParseAlignModeError(s.to_string())),
        }
    }
}

impl fmt::Display for AlignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignMode::Top => f.write_str("top"),
            AlignMode::Center => f.write_str("center"),
        }
    }
}

/// A mapped vertical coordinate with its intermediate values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedY {
    /// Final physical Y on the destination, clamped inside its bounds.
    pub y: i32,
    /// Source Y converted to norm units.
    pub source_y_norm: f64,
    /// Relative position on the destination, in `[0, 1]`.
    pub relative: f64,
    /// Destination Y in norm units, before rounding and clamping.
    pub dest_y_norm: f64,
}

/// Where the cursor should be placed after a crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub x: i32,
    pub y: i32,
    pub mapped: MappedY,
}

/// Maps a physical Y on `source` to a physical Y on `dest`, top-aligned.
///
/// 1. convert to norm units on the source,
/// 2. take the relative position within the source's norm extent, clamped
///    to `[0, 1]`,
/// 3. apply it to the destination's norm extent,
/// 4. convert back to physical pixels (rounded),
/// 5. clamp into `[dest.top, dest.bottom - 1]`.
pub fn map_landing(source: &Monitor, dest: &Monitor, source_y: i32) -> i32 {
    map_landing_with_mode(source, dest, source_y, AlignMode::Top).y
}

/// Like [`map_landing`], for any [`AlignMode`], returning the breakdown.
pub fn map_landing_with_mode(
    source: &Monitor,
    dest: &Monitor,
    source_y: i32,
    mode: AlignMode,
) -> MappedY {
    let source_y_norm = source.to_norm(source_y);

    let (relative, dest_y_norm) = match mode {
        AlignMode::Top => {
            let relative =
                ((source_y_norm - source.norm_top()) / source.norm_height()).clamp(0.0, 1.0);
            (relative, dest.norm_top() + relative * dest.norm_height())
        }
        AlignMode::Center => {
            let from_center = source.norm_top() + source.norm_height() * 0.5;
            let to_center = dest.norm_top() + dest.norm_height() * 0.5;
            let offset = (source_y_norm - from_center) / source.norm_height();
            let dest_y_norm = to_center + offset * dest.norm_height();
            let relative = ((dest_y_norm - dest.norm_top()) / dest.norm_height()).clamp(0.0, 1.0);
            (relative, dest_y_norm)
        }
    };

    let bounds = dest.bounds();
    let y = ((dest_y_norm * dest.scale()).round() as i32).clamp(bounds.top, bounds.bottom - 1);

    MappedY {
        y,
        source_y_norm,
        relative,
        dest_y_norm,
    }
}

/// Landing X just inside `dest`'s edge nearest the seam.
pub fn landing_x(direction: Direction, dest: &Monitor) -> i32 {
    match direction {
        Direction::LeftToRight => dest.bounds().left + LANDING_INSET,
        Direction::RightToLeft => dest.bounds().right - LANDING_INSET,
    }
}

/// Computes the full landing point for `crossing` on `pair`.
pub fn compute_landing(pair: &MonitorPair, crossing: &Crossing, mode: AlignMode) -> Landing {
    let (source, dest) = pair.endpoints(crossing.direction);
    let mapped = map_landing_with_mode(source, dest, crossing.source_y, mode);
    Landing {
        x: landing_x(crossing.direction, dest),
        y: mapped.y,
        mapped,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
