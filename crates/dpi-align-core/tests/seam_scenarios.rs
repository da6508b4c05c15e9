//! End-to-end scenarios for the core: select a pair, feed samples, compute
//! landings, and replay the warp echo, without any OS plumbing.

use dpi_align_core::{
    compute_landing, AlignMode, CrossingDetector, CursorSample, Direction, DisplayRecord,
    MonitorPair, Observation, PairSelection, PhysicalBounds,
};

fn scenario_records() -> Vec<DisplayRecord> {
    vec![
        DisplayRecord::new("\\\\.\\DISPLAY1", PhysicalBounds::new(0, 0, 1920, 1080), 1.0),
        DisplayRecord::new("\\\\.\\DISPLAY2", PhysicalBounds::new(1920, 0, 3840, 1200), 1.25),
    ]
}

/// Feeds `sample` and, on a crossing, performs the same steps the host's
/// relocator does.  Returns the landing point if a warp happened.
fn step(
    detector: &mut CrossingDetector,
    pair: &MonitorPair,
    sample: CursorSample,
) -> Option<CursorSample> {
    match detector.observe(sample) {
        Observation::Crossed(crossing) => {
            let landing = compute_landing(pair, &crossing, AlignMode::Top);
            let target = CursorSample::new(landing.x, landing.y);
            detector.arm_suppression();
            detector.rebase(target);
            Some(target)
        }
        _ => None,
    }
}

#[test]
fn test_scenario_left_to_right_lands_at_1922_600() {
    // Arrange
    let pair = MonitorPair::select(&scenario_records(), &PairSelection::default()).unwrap();
    let mut detector = CrossingDetector::new(pair.boundary_x());

    // Act
    assert_eq!(step(&mut detector, &pair, CursorSample::new(1918, 540)), None);
    let landing = step(&mut detector, &pair, CursorSample::new(1925, 540));

    // Assert
    assert_eq!(landing, Some(CursorSample::new(1922, 600)));
}

#[test]
fn test_warp_echo_is_not_a_second_crossing() {
    // Arrange
    let pair = MonitorPair::select(&scenario_records(), &PairSelection::default()).unwrap();
    let mut detector = CrossingDetector::new(pair.boundary_x());
    step(&mut detector, &pair, CursorSample::new(1918, 540));
    let landing = step(&mut detector, &pair, CursorSample::new(1925, 540)).unwrap();

    // Act: the OS delivers our own SetCursorPos as a mouse move.
    let echo = detector.observe(landing);

    // Assert
    assert_eq!(echo, Observation::Suppressed);
    assert_eq!(
        detector.observe(CursorSample::new(1930, 600)),
        Observation::NoCrossing
    );
}

#[test]
fn test_round_trip_returns_to_original_height() {
    // Arrange
    let pair = MonitorPair::select(&scenario_records(), &PairSelection::default()).unwrap();
    let mut detector = CrossingDetector::new(pair.boundary_x());
    step(&mut detector, &pair, CursorSample::new(1900, 270));
    let there = step(&mut detector, &pair, CursorSample::new(1921, 270)).unwrap();
    detector.observe(there);

    // Act: move back left from the landing height.
    let back = step(&mut detector, &pair, CursorSample::new(1915, there.y)).unwrap();

    // Assert
    assert_eq!(back, CursorSample::new(1918, 270));
}

#[test]
fn test_crossing_back_right_from_bottom_row_clamps_inside_destination() {
    // Arrange: cursor sits on the left monitor's last row.
    let pair = MonitorPair::select(&scenario_records(), &PairSelection::default()).unwrap();
    let mut detector = CrossingDetector::new(pair.boundary_x());
    step(&mut detector, &pair, CursorSample::new(10, 1079));
    step(&mut detector, &pair, CursorSample::new(1919, 1079));

    // Act
    let landing = step(&mut detector, &pair, CursorSample::new(1920, 1079)).unwrap();

    // Assert
    assert_eq!(landing.y, pair.right().bounds().bottom - 1);
}

#[test]
fn test_discovery_is_stable_across_calls() {
    let records = scenario_records();
    let first = MonitorPair::select(&records, &PairSelection::default()).unwrap();
    let second = MonitorPair::select(&records, &PairSelection::default()).unwrap();
    assert_eq!(first.boundary_x(), second.boundary_x());
    assert_eq!(first.left(), second.left());
    assert_eq!(first.right(), second.right());
}

#[test]
fn test_monitors_left_of_primary_use_negative_seam() {
    // Arrange: a 150 % laptop panel to the left of a 100 % primary.
    let records = vec![
        DisplayRecord::new("primary", PhysicalBounds::new(0, 0, 2560, 1440), 1.0),
        DisplayRecord::new("laptop", PhysicalBounds::new(-2880, 0, 0, 1800), 1.5),
    ];
    let pair = MonitorPair::select(&records, &PairSelection::default()).unwrap();
    let mut detector = CrossingDetector::new(pair.boundary_x());

    // Act: leave the primary at mid-height heading left.
    step(&mut detector, &pair, CursorSample::new(3, 720));
    let observed = detector.observe(CursorSample::new(-4, 720));

    // Assert
    assert_eq!(pair.boundary_x(), 0);
    match observed {
        Observation::Crossed(c) => {
            assert_eq!(c.direction, Direction::RightToLeft);
            let landing = compute_landing(&pair, &c, AlignMode::Top);
            assert_eq!((landing.x, landing.y), (-2, 900));
        }
        other => panic!("expected crossing, got {other:?}"),
    }
}
