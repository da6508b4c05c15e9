//! Windows cursor placement via `SetCursorPos`.
//!
//! The process must be per-monitor DPI aware for the coordinates to be
//! interpreted as physical pixels.

use windows::Win32::UI::WindowsAndMessaging::SetCursorPos;

use crate::application::relocate_cursor::{CursorMover, MoveError};

/// Moves the system cursor with `SetCursorPos`.
#[derive(Debug, Default)]
pub struct WindowsCursorMover;

impl WindowsCursorMover {
    pub fn new() -> Self {
        Self
    }
}

impl CursorMover for WindowsCursorMover {
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), MoveError> {
        // SAFETY: No pointer arguments; fails cleanly if the desktop is
        // not interactive (e.g. secure desktop active).
        unsafe { SetCursorPos(x, y) }.map_err(|e| MoveError {
            x,
            y,
            reason: e.to_string(),
        })
    }
}
