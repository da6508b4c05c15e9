//! Full-pipeline tests: mock enumerator → discovery → use case → mock hook,
//! with a recording cursor mover standing in for `SetCursorPos`.

use std::sync::{Arc, Mutex};

use dpi_align::application::align_cursor::{AlignCursorUseCase, DEFAULT_TOGGLE_VK};
use dpi_align::application::discover_monitors::{discover, DiscoveryError};
use dpi_align::infrastructure::cursor::RecordingCursorMover;
use dpi_align::infrastructure::input_capture::mock::MockInputHook;
use dpi_align::infrastructure::input_capture::{InputHook, RawInputEvent, SampleDecision};
use dpi_align::infrastructure::screen_info::MockScreenEnumerator;
use dpi_align_core::{AlignMode, DisplayRecord, PairSelection, PhysicalBounds, TopologyError};

fn mouse(x: i32, y: i32) -> RawInputEvent {
    RawInputEvent::MouseMove { x, y, time_ms: 0 }
}

fn key(vk_code: u8) -> RawInputEvent {
    RawInputEvent::KeyDown {
        vk_code,
        time_ms: 0,
    }
}

fn key_up(vk_code: u8) -> RawInputEvent {
    RawInputEvent::KeyUp {
        vk_code,
        time_ms: 0,
    }
}

/// Builds the pipeline for `enumerator` and starts the mock hook.
fn start_pipeline(
    enumerator: &MockScreenEnumerator,
    mover: Arc<RecordingCursorMover>,
) -> (MockInputHook, Arc<Mutex<AlignCursorUseCase>>) {
    let pair = discover(enumerator, &PairSelection::default()).expect("discover");
    let use_case = Arc::new(Mutex::new(AlignCursorUseCase::new(
        pair,
        mover,
        AlignMode::Top,
    )));

    let mut hook = MockInputHook::new();
    let handler_uc = Arc::clone(&use_case);
    hook.start(Box::new(move |event| {
        handler_uc.lock().unwrap().handle_event(event)
    }))
    .expect("start");
    (hook, use_case)
}

#[test]
fn test_scenario_crossing_warps_to_1922_600_and_consumes() {
    // Arrange
    let mover = Arc::new(RecordingCursorMover::new());
    let (mut hook, _) = start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover.clone());

    // Act
    let before = hook.inject(mouse(1918, 540));
    let crossing = hook.inject(mouse(1925, 540));

    // Assert
    assert_eq!(before, SampleDecision::Ignore);
    assert_eq!(crossing, SampleDecision::Consume);
    assert_eq!(mover.moves(), vec![(1922, 600)]);
}

#[test]
fn test_warp_echo_passes_through_without_second_warp() {
    // Arrange
    let mover = Arc::new(RecordingCursorMover::new());
    let (mut hook, _) = start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover.clone());
    hook.inject(mouse(1918, 540));
    hook.inject(mouse(1925, 540));

    // Act: the OS reports the warp, then the user keeps moving.
    let echo = hook.inject(mouse(1922, 600));
    let after = hook.inject(mouse(1940, 610));

    // Assert
    assert_eq!(echo, SampleDecision::Ignore);
    assert_eq!(after, SampleDecision::Ignore);
    assert_eq!(mover.moves().len(), 1);
    assert_eq!(hook.consumed_count(), 1);
}

#[test]
fn test_back_and_forth_keeps_perceived_height() {
    // Arrange
    let mover = Arc::new(RecordingCursorMover::new());
    let (mut hook, _) = start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover.clone());

    // Act
    hook.inject(mouse(1900, 270));
    hook.inject(mouse(1921, 270)); // warp to a quarter of the way down
    hook.inject(mouse(1922, 300)); // echo
    hook.inject(mouse(1915, 300)); // warp back

    // Assert
    assert_eq!(mover.moves(), vec![(1922, 300), (1918, 270)]);
}

#[test]
fn test_sample_exactly_on_seam_counts_as_crossing() {
    let mover = Arc::new(RecordingCursorMover::new());
    let (mut hook, _) = start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover.clone());

    hook.inject(mouse(1919, 100));

    assert_eq!(hook.inject(mouse(1920, 100)), SampleDecision::Consume);
    assert_eq!(mover.moves(), vec![(1922, 111)]);
}

#[test]
fn test_toggle_key_suspends_and_resumes_alignment() {
    // Arrange
    let mover = Arc::new(RecordingCursorMover::new());
    let (mut hook, use_case) =
        start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover.clone());

    // Act: disable, cross natively, re-enable, cross back.
    assert_eq!(hook.inject(key(DEFAULT_TOGGLE_VK)), SampleDecision::Ignore);
    assert_eq!(hook.inject(key_up(DEFAULT_TOGGLE_VK)), SampleDecision::Ignore);
    hook.inject(mouse(1918, 540));
    let native = hook.inject(mouse(1925, 540));
    hook.inject(key(DEFAULT_TOGGLE_VK));
    hook.inject(key_up(DEFAULT_TOGGLE_VK));
    let aligned = hook.inject(mouse(1910, 540));

    // Assert
    assert_eq!(native, SampleDecision::Ignore);
    assert_eq!(aligned, SampleDecision::Consume);
    assert!(use_case.lock().unwrap().is_enabled());
    // 540 px on the 125 % panel is 432 norm units: 45 % of the way down.
    assert_eq!(mover.moves(), vec![(1918, 486)]);
}

#[test]
fn test_auto_repeated_toggle_key_leaves_alignment_disabled() {
    // Arrange
    let mover = Arc::new(RecordingCursorMover::new());
    let (mut hook, use_case) =
        start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover.clone());

    // Act: hold the key long enough for two repeats, then release and cross.
    hook.inject(key(DEFAULT_TOGGLE_VK));
    hook.inject(key(DEFAULT_TOGGLE_VK));
    hook.inject(key(DEFAULT_TOGGLE_VK));
    hook.inject(key_up(DEFAULT_TOGGLE_VK));
    hook.inject(mouse(1918, 540));
    let crossing = hook.inject(mouse(1925, 540));

    // Assert
    assert!(!use_case.lock().unwrap().is_enabled());
    assert_eq!(crossing, SampleDecision::Ignore);
    assert!(mover.moves().is_empty());
}

#[test]
fn test_failed_warp_lets_native_crossing_through() {
    // Arrange
    let mover = Arc::new(RecordingCursorMover::failing());
    let (mut hook, use_case) =
        start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover.clone());
    hook.inject(mouse(1918, 540));

    // Act
    let decision = hook.inject(mouse(1925, 540));
    let next = hook.inject(mouse(1930, 540));

    // Assert
    assert_eq!(decision, SampleDecision::Ignore);
    assert_eq!(next, SampleDecision::Ignore);
    assert_eq!(mover.moves().len(), 1);
    assert!(!use_case.lock().unwrap().detector().is_suppressing());
}

#[test]
fn test_stop_detaches_handler() {
    let mover = Arc::new(RecordingCursorMover::new());
    let (mut hook, _) = start_pipeline(&MockScreenEnumerator::dual_mixed_dpi(), mover);

    hook.stop();

    assert!(!hook.is_running());
}

#[test]
fn test_single_monitor_is_rejected_at_discovery() {
    let err = discover(&MockScreenEnumerator::single_1080p(), &PairSelection::default())
        .unwrap_err();

    assert!(matches!(
        err,
        DiscoveryError::Topology(TopologyError::InsufficientDisplays { found: 1 })
    ));
}

#[test]
fn test_enumeration_failure_is_reported() {
    let err = discover(
        &MockScreenEnumerator::failing("EnumDisplayMonitors failed"),
        &PairSelection::default(),
    )
    .unwrap_err();

    assert!(matches!(err, DiscoveryError::Enumeration(_)));
}

#[test]
fn test_explicit_selection_with_scale_override() {
    // Arrange: three monitors; align B and C and force C to 150 %.
    let enumerator = MockScreenEnumerator::new(vec![
        DisplayRecord::new("A", PhysicalBounds::new(0, 0, 1920, 1080), 1.0),
        DisplayRecord::new("B", PhysicalBounds::new(1920, 0, 3840, 1080), 1.0),
        DisplayRecord::new("C", PhysicalBounds::new(3840, 0, 6720, 1620), 1.0),
    ]);
    let selection = PairSelection {
        left_index: Some(1),
        right_index: Some(2),
        left_scale: None,
        right_scale: Some(1.5),
    };
    let pair = discover(&enumerator, &selection).unwrap();
    let mover = Arc::new(RecordingCursorMover::new());
    let mut use_case = AlignCursorUseCase::new(pair, mover.clone(), AlignMode::Top);

    // Act
    use_case.on_cursor_sample(3800, 540);
    let decision = use_case.on_cursor_sample(3850, 540);

    // Assert
    assert_eq!(use_case.pair().boundary_x(), 3840);
    assert_eq!(decision, SampleDecision::Consume);
    assert_eq!(mover.moves(), vec![(3842, 810)]);
}
