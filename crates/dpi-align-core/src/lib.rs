//! # dpi-align-core
//!
//! Pure geometry and state-machine logic for DPI-Align: moving the mouse
//! cursor between two side-by-side monitors with different scale factors so
//! that the cursor lands at the same *perceived* height on the other side.
//!
//! This crate has zero dependencies on OS APIs, hooks, or threads.  The host
//! crate (`dpi-align`) owns the Windows plumbing and calls into this crate
//! once per mouse-move notification.
//!
//! # Architecture overview (for beginners)
//!
//! A monitor with a 125 % scale factor packs 1.25 device pixels into every
//! "density-independent" unit.  If the cursor leaves a 100 % monitor at raw
//! pixel row 540 and simply continues at raw row 540 on the 125 % monitor,
//! it appears noticeably higher than where it left.  DPI-Align corrects this
//! by converting the crossing height into norm units, mapping it
//! proportionally onto the destination, and converting back.
//!
//! - **`domain::monitor`** – one display's physical bounds, scale, and its
//!   projection into norm units.
//! - **`domain::pair`** – picks the left/right pair out of the discovered
//!   displays and fixes the seam (`boundary_x`).
//! - **`domain::crossing`** – the tracking state machine that classifies each
//!   cursor sample as a seam crossing or not, including the one-shot
//!   suppression flag that stops the corrective warp from ping-ponging.
//! - **`domain::mapping`** – computes the landing point on the destination
//!   monitor.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `dpi_align_core::Monitor` instead of `dpi_align_core::domain::monitor::Monitor`.
pub use domain::crossing::{
    Crossing, CrossingDetector, CursorSample, Direction, Observation, SampleDecision,
};
pub use domain::mapping::{compute_landing, map_landing, AlignMode, Landing, LANDING_INSET};
pub use domain::monitor::{DisplayRecord, Monitor, PhysicalBounds, TopologyError, REFERENCE_DPI};
pub use domain::pair::{MonitorPair, PairSelection};
