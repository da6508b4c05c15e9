//! Domain entities for DPI-Align.
//!
//! Everything in here is plain data and pure functions: no OS handles, no
//! threads, no I/O.  The infrastructure layer of the host crate turns Win32
//! callbacks into the types defined here, and turns the decisions made here
//! back into Win32 return codes.

/// Physical geometry and scale of a single display.
pub mod monitor;

/// Selection of the left/right monitor pair and the seam between them.
pub mod pair;

/// Seam-crossing state machine.
pub mod crossing;

/// Landing-point computation on the destination monitor.
pub mod mapping;
