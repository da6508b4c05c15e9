//! Application layer use cases for DPI-Align.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure geometry in `dpi-align-core`) and the infrastructure (Win32 hooks,
//! cursor moves, monitor queries).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "keep the
//!   cursor at the same perceived height when it crosses to the other
//!   monitor").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the Win32 code can be swapped for mocks in tests.
//! - **Contain no OS calls**.
//!
//! # Sub-modules
//!
//! - **`discover_monitors`** – Enumerates displays through a
//!   [`discover_monitors::DisplayEnumerator`] and selects the left/right pair.
//!   Runs once at startup.
//!
//! - **`relocate_cursor`** – Moves the cursor to a landing point and arms the
//!   suppression flag so the move is not mistaken for user input.
//!
//! - **`align_cursor`** – Receives every mouse-move sample from the hook and
//!   decides whether to pass it through or swallow it.  This runs inline on
//!   the hook thread for every mouse movement on the system.

pub mod align_cursor;
pub mod discover_monitors;
pub mod relocate_cursor;
