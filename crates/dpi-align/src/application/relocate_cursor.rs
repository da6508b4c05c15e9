//! Cursor relocation with echo suppression.
//!
//! Moving the cursor programmatically makes the OS deliver one more
//! mouse-move notification at the new position.  [`CursorRelocator`] arms the
//! detector's one-shot suppression *before* issuing the move so that echo is
//! never mistaken for a fresh crossing.

use std::sync::Arc;

use dpi_align_core::{CrossingDetector, CursorSample};
use thiserror::Error;
use tracing::trace;

/// The OS refused to move the cursor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to move cursor to ({x}, {y}): {reason}")]
pub struct MoveError {
    pub x: i32,
    pub y: i32,
    pub reason: String,
}

/// Places the system cursor at an absolute device-pixel position.
#[cfg_attr(test, mockall::automock)]
pub trait CursorMover: Send + Sync {
    /// # Errors
    ///
    /// Returns [`MoveError`] if the platform call fails.
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), MoveError>;
}

/// Warps the cursor and keeps the crossing detector consistent with it.
pub struct CursorRelocator {
    mover: Arc<dyn CursorMover>,
}

impl CursorRelocator {
    pub fn new(mover: Arc<dyn CursorMover>) -> Self {
        Self { mover }
    }

    /// Moves the cursor to `target` and makes it the detector's baseline.
    ///
    /// On failure the suppression flag is cleared again, since no echo will
    /// arrive, and the baseline is left untouched for the caller to set.
    ///
    /// # Errors
    ///
    /// Propagates the [`MoveError`] from the underlying mover.
    pub fn relocate(
        &self,
        detector: &mut CrossingDetector,
        target: CursorSample,
    ) -> Result<(), MoveError> {
        detector.arm_suppression();
        if let Err(e) = self.mover.move_cursor_to(target.x, target.y) {
            detector.clear_suppression();
            return Err(e);
        }
        detector.rebase(target);
        trace!(x = target.x, y = target.y, "cursor relocated");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
