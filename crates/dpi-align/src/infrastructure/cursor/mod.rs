//! Absolute cursor placement.
//!
//! [`RecordingCursorMover`] is always compiled so tests on any platform can
//! observe the warps the use case performs.

use std::sync::Mutex;

use crate::application::relocate_cursor::{CursorMover, MoveError};

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsCursorMover;

/// A [`CursorMover`] that records every requested position.
#[derive(Debug, Default)]
pub struct RecordingCursorMover {
    moves: Mutex<Vec<(i32, i32)>>,
    should_fail: bool,
}

impl RecordingCursorMover {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mover that records the attempt and then reports failure.
    pub fn failing() -> Self {
        Self {
            moves: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Every position passed to `move_cursor_to`, oldest first.
    pub fn moves(&self) -> Vec<(i32, i32)> {
        self.moves.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CursorMover for RecordingCursorMover {
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), MoveError> {
        self.moves.lock().unwrap_or_else(|e| e.into_inner()).push((x, y));
        if self.should_fail {
            return Err(MoveError {
                x,
                y,
                reason: "recording mover configured to fail".to_string(),
            });
        }
        Ok(())
    }
}
