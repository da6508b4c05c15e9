//! Seam-crossing detection over a live stream of cursor samples.
//!
//! # State machine (for beginners)
//!
//! ```text
//!            first sample
//! NoBaseline ────────────► Tracking ──┐
//!                              ▲      │ every later sample
//!                              └──────┘
//! ```
//!
//! In `Tracking`, each new sample is compared with the previous one.  If the
//! X coordinate moved from one side of `boundary_x` to the other, that is a
//! [`Crossing`].  A sample exactly on `boundary_x` counts as the right side.
//!
//! # Suppression
//!
//! Warping the cursor produces a fresh mouse-move notification that looks
//! exactly like user movement.  Before warping, the relocator arms a one-shot
//! suppression flag; the next sample clears it and only becomes the new
//! baseline.  Without this the warp itself would be read as a second
//! crossing and the cursor would bounce back.
//!
//! The detector assumes serial delivery: exactly one thread feeds it, in
//! arrival order, so it holds plain fields and takes `&mut self`.

/// A cursor position in device pixels, virtual-desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorSample {
    pub x: i32,
    pub y: i32,
}

impl CursorSample {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which way the cursor crossed the seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// A detected seam crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub direction: Direction,
    /// Y of the last sample before the crossing; the height the user left at.
    pub source_y: i32,
    /// The last sample before the crossing.
    pub from: CursorSample,
    /// The raw sample that crossed.
    pub to: CursorSample,
}

/// Result of feeding one sample to the [`CrossingDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The sample was the expected echo of our own warp and was swallowed.
    Suppressed,
    /// First sample seen; it became the baseline.
    Baseline,
    /// The cursor stayed on the same side.
    NoCrossing,
    /// The cursor crossed the seam.  The baseline was *not* advanced.
    Crossed(Crossing),
}

/// What the input hook should do with the native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleDecision {
    /// Forward the event to the rest of the system unchanged.
    Ignore,
    /// Swallow the event; the cursor has already been placed elsewhere.
    Consume,
}

/// Tracking state: previous sample and the one-shot suppression flag.
#[derive(Debug, Clone)]
pub struct CrossingDetector {
    boundary_x: i32,
    previous: Option<CursorSample>,
    suppress_next: bool,
}

impl CrossingDetector {
    /// Creates a detector in the `NoBaseline` state.
    pub fn new(boundary_x: i32) -> Self {
        Self {
            boundary_x,
            previous: None,
            suppress_next: false,
        }
    }

    pub fn boundary_x(&self) -> i32 {
        self.boundary_x
    }

    /// The last accepted sample, or `None` before the first one.
    pub fn previous(&self) -> Option<CursorSample> {
        self.previous
    }

    /// `true` once a baseline sample exists.
    pub fn is_tracking(&self) -> bool {
        self.previous.is_some()
    }

    /// `true` while a relocation-induced sample is expected.
    pub fn is_suppressing(&self) -> bool {
        self.suppress_next
    }

    /// Classifies one sample and updates the tracking state.
    pub fn observe(&mut self, sample: CursorSample) -> Observation {
        if self.suppress_next {
            self.suppress_next = false;
            self.previous = Some(sample);
            return Observation::Suppressed;
        }

        let Some(prev) = self.previous else {
            self.previous = Some(sample);
            return Observation::Baseline;
        };

        let direction = if prev.x < self.boundary_x && sample.x >= self.boundary_x {
            Some(Direction::LeftToRight)
        } else if prev.x >= self.boundary_x && sample.x < self.boundary_x {
            Some(Direction::RightToLeft)
        } else {
            None
        };

        match direction {
            Some(direction) => Observation::Crossed(Crossing {
                direction,
                source_y: prev.y,
                from: prev,
                to: sample,
            }),
            None => {
                self.previous = Some(sample);
                Observation::NoCrossing
            }
        }
    }

    /// Expects the next sample to be the echo of a warp.
    pub fn arm_suppression(&mut self) {
        self.suppress_next = true;
    }

    /// Cancels a pending suppression (e.g. the warp never happened).
    pub fn clear_suppression(&mut self) {
        self.suppress_next = false;
    }

    /// Replaces the baseline, typically with a warp's landing point.
    pub fn rebase(&mut self, sample: CursorSample) {
        self.previous = Some(sample);
    }

    /// Returns to `NoBaseline` for a new seam position.
    pub fn reset(&mut self, boundary_x: i32) {
        self.boundary_x = boundary_x;
        self.previous = None;
        self.suppress_next = false;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
