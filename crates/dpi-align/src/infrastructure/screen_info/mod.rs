//! Platform-specific display enumeration.
//!
//! Reports every active display's physical bounds and effective DPI scale so
//! the monitor pair can be selected and norm units computed.
//!
//! # DPI awareness
//!
//! Physical coordinates are only reported when the process is per-monitor DPI
//! aware.  Otherwise Windows virtualises coordinates using the primary
//! monitor's DPI and every mapping is off.  Call [`enable_dpi_awareness`]
//! once, before the first enumeration.
//!
//! | Module    | OS      | API used                                              |
//! |-----------|---------|-------------------------------------------------------|
//! | `windows` | Windows | `EnumDisplayMonitors` + `GetMonitorInfoW` + `GetDpiForMonitor` |
//!
//! A [`MockScreenEnumerator`] is always compiled (not guarded by `#[cfg]`) so
//! tests on any platform can use it without a physical display.

use dpi_align_core::{DisplayRecord, PhysicalBounds};

use crate::application::discover_monitors::{DisplayEnumerator, EnumerationError};

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::{enable_dpi_awareness, WindowsScreenEnumerator as NativeScreenEnumerator};

/// Per-monitor DPI awareness is a Windows concept; elsewhere this does nothing.
#[cfg(not(target_os = "windows"))]
pub fn enable_dpi_awareness() {}

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A display enumerator that returns a fixed list of records.
///
/// Used in unit and integration tests.  Does not make any OS calls.
pub struct MockScreenEnumerator {
    /// The records this enumerator always returns.
    pub records: Vec<DisplayRecord>,
    /// When set, `enumerate_displays` fails with this message instead.
    pub failure: Option<String>,
}

impl MockScreenEnumerator {
    pub fn new(records: Vec<DisplayRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// A 1920×1080 panel at 100 % with a 1920×1200 panel at 125 % to its right.
    pub fn dual_mixed_dpi() -> Self {
        Self::new(vec![
            DisplayRecord::new(
                "\\\\.\\DISPLAY1",
                PhysicalBounds::new(0, 0, 1920, 1080),
                1.0,
            ),
            DisplayRecord::new(
                "\\\\.\\DISPLAY2",
                PhysicalBounds::new(1920, 0, 3840, 1200),
                1.25,
            ),
        ])
    }

    /// A single 1920×1080 monitor at 100 %.
    pub fn single_1080p() -> Self {
        Self::new(vec![DisplayRecord::new(
            "\\\\.\\DISPLAY1",
            PhysicalBounds::new(0, 0, 1920, 1080),
            1.0,
        )])
    }

    /// An enumerator whose platform query always fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl DisplayEnumerator for MockScreenEnumerator {
    fn enumerate_displays(&self) -> Result<Vec<DisplayRecord>, EnumerationError> {
        match &self.failure {
            Some(message) => Err(EnumerationError(message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_dual_mixed_dpi_returns_two_records() {
        let records = MockScreenEnumerator::dual_mixed_dpi()
            .enumerate_displays()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].scale, 1.25);
    }

    #[test]
    fn test_mock_failing_reports_enumeration_error() {
        let err = MockScreenEnumerator::failing("no desktop")
            .enumerate_displays()
            .unwrap_err();
        assert!(err.to_string().contains("no desktop"));
    }

    #[test]
    fn test_enable_dpi_awareness_can_be_called_repeatedly() {
        enable_dpi_awareness();
        enable_dpi_awareness();
    }
}
