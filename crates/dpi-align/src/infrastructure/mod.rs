//! Infrastructure layer: OS-facing adapters behind the application traits.
//!
//! - [`input_capture`]: low-level mouse/keyboard hooks that feed raw events
//!   to the use case and apply its swallow/forward decision.
//! - [`screen_info`]: display enumeration with per-monitor effective DPI.
//! - [`cursor`]: absolute cursor placement.
//!
//! Every adapter has an always-compiled mock so the whole pipeline can be
//! exercised on any platform.

pub mod cursor;
pub mod input_capture;
pub mod screen_info;
