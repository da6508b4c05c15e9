//! Monitor discovery: enumerate displays and select the aligned pair.
//!
//! This runs once at startup.  Any error here is fatal: with fewer than two
//! usable monitors there is no seam to watch.

use dpi_align_core::domain::pair::usable_monitors;
use dpi_align_core::{DisplayRecord, Monitor, MonitorPair, PairSelection, TopologyError};
use thiserror::Error;
use tracing::{debug, info};

/// The platform failed to enumerate displays.
#[derive(Debug, Error)]
#[error("platform API error while enumerating monitors: {0}")]
pub struct EnumerationError(pub String);

/// Errors from [`discover`] and [`list_monitors`].
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Source of display geometry and scale.
///
/// The Windows implementation wraps `EnumDisplayMonitors`; tests use
/// [`crate::infrastructure::screen_info::MockScreenEnumerator`] or a
/// `mockall` mock.
#[cfg_attr(test, mockall::automock)]
pub trait DisplayEnumerator: Send + Sync {
    /// Returns every active display in enumeration order.
    ///
    /// Scale factors the platform cannot report must already be 1.0.
    fn enumerate_displays(&self) -> Result<Vec<DisplayRecord>, EnumerationError>;
}

/// Enumerates displays and selects the monitor pair.
///
/// # Errors
///
/// Returns [`DiscoveryError::Enumeration`] if the platform query fails and
/// [`DiscoveryError::Topology`] if no valid pair can be formed.
pub fn discover(
    enumerator: &dyn DisplayEnumerator,
    selection: &PairSelection,
) -> Result<MonitorPair, DiscoveryError> {
    let records = enumerator.enumerate_displays()?;
    debug!(count = records.len(), "enumerated displays");

    let pair = MonitorPair::select(&records, selection)?;
    info!(
        left = %pair.left().name(),
        right = %pair.right().name(),
        boundary_x = pair.boundary_x(),
        "monitor pair selected"
    );
    Ok(pair)
}

/// Returns the usable monitors sorted left to right.
///
/// Positions in the returned list are the indices accepted by
/// [`PairSelection`].
///
/// # Errors
///
/// Returns [`DiscoveryError::Enumeration`] if the platform query fails.
pub fn list_monitors(enumerator: &dyn DisplayEnumerator) -> Result<Vec<Monitor>, DiscoveryError> {
    let records = enumerator.enumerate_displays()?;
    Ok(usable_monitors(&records))
}

/// Renders monitors as one line each, prefixed with their selection index.
///
/// Each line shows the device name, physical bounds, scale and the height in
/// norm units that crossings are mapped through.
pub fn format_monitor_list(monitors: &[Monitor]) -> String {
    let mut out = String::new();
    for (i, m) in monitors.iter().enumerate() {
        let b = m.bounds();
        let name = if m.name().is_empty() { "<unnamed>" } else { m.name() };
        out.push_str(&format!(
            "[{i}] {name}  ({}, {}) - ({}, {})  {}x{}  scale {:.2}  norm height {:.1}\n",
            b.left,
            b.top,
            b.right,
            b.bottom,
            b.width(),
            b.height(),
            m.scale(),
            m.norm_height()
        ));
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dpi_align_core::PhysicalBounds;

    fn dual_records() -> Vec<DisplayRecord> {
        vec![
            DisplayRecord::new("R", PhysicalBounds::new(1920, 0, 3840, 1200), 1.25),
            DisplayRecord::new("L", PhysicalBounds::new(0, 0, 1920, 1080), 1.0),
        ]
    }

    #[test]
    fn test_discover_selects_pair_from_enumerated_records() {
        // Arrange
        let mut enumerator = MockDisplayEnumerator::new();
        enumerator
            .expect_enumerate_displays()
            .times(1)
            .returning(|| Ok(dual_records()));

        // Act
        let pair = discover(&enumerator, &PairSelection::default()).expect("discover");

        // Assert
        assert_eq!(pair.left().name(), "L");
        assert_eq!(pair.boundary_x(), 1920);
    }

    #[test]
    fn test_discover_twice_yields_same_topology() {
        // Arrange
        let mut enumerator = MockDisplayEnumerator::new();
        enumerator
            .expect_enumerate_displays()
            .times(2)
            .returning(|| Ok(dual_records()));

        // Act
        let first = discover(&enumerator, &PairSelection::default()).unwrap();
        let second = discover(&enumerator, &PairSelection::default()).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_discover_reports_insufficient_displays() {
        let mut enumerator = MockDisplayEnumerator::new();
        enumerator.expect_enumerate_displays().returning(|| {
            Ok(vec![DisplayRecord::new(
                "only",
                PhysicalBounds::new(0, 0, 1920, 1080),
                1.0,
            )])
        });

        let err = discover(&enumerator, &PairSelection::default()).unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::Topology(TopologyError::InsufficientDisplays { found: 1 })
        ));
    }

    #[test]
    fn test_discover_propagates_enumeration_failure() {
        let mut enumerator = MockDisplayEnumerator::new();
        enumerator
            .expect_enumerate_displays()
            .returning(|| Err(EnumerationError("EnumDisplayMonitors failed".to_string())));

        let err = discover(&enumerator, &PairSelection::default()).unwrap_err();

        assert!(matches!(err, DiscoveryError::Enumeration(_)));
        assert!(err.to_string().contains("EnumDisplayMonitors failed"));
    }

    #[test]
    fn test_list_monitors_returns_sorted_usable_monitors() {
        // Arrange
        let mut enumerator = MockDisplayEnumerator::new();
        enumerator.expect_enumerate_displays().returning(|| {
            let mut records = dual_records();
            records.push(DisplayRecord::new(
                "broken",
                PhysicalBounds::new(-100, 0, 0, 0),
                1.0,
            ));
            Ok(records)
        });

        // Act
        let monitors = list_monitors(&enumerator).unwrap();

        // Assert
        let names: Vec<&str> = monitors.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["L", "R"]);
    }

    #[test]
    fn test_format_monitor_list_shows_index_bounds_and_scale() {
        // Arrange
        let monitors = usable_monitors(&dual_records());

        // Act
        let text = format_monitor_list(&monitors);

        // Assert
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "[0] L  (0, 0) - (1920, 1080)  1920x1080  scale 1.00  norm height 1080.0"
        );
        assert_eq!(
            lines[1],
            "[1] R  (1920, 0) - (3840, 1200)  1920x1200  scale 1.25  norm height 960.0"
        );
    }

    #[test]
    fn test_format_monitor_list_labels_unnamed_monitors() {
        let monitors = usable_monitors(&[DisplayRecord::new(
            "",
            PhysicalBounds::new(0, 0, 800, 600),
            1.0,
        )]);
        assert!(format_monitor_list(&monitors).starts_with("[0] <unnamed>"));
    }
}
