//! Input capture infrastructure.
//!
//! On Windows this installs low-level mouse and keyboard hooks (WH_MOUSE_LL,
//! WH_KEYBOARD_LL) on a dedicated Win32 message-loop thread.
//!
//! # Synchronous decisions
//!
//! Unlike a forwarding pipeline, alignment must decide *inside* the hook
//! callback whether the native move is applied.  The [`EventHandler`] is
//! therefore called on the hook thread itself and its [`SampleDecision`] is
//! returned straight to the OS.  Events reach the handler one at a time, in
//! arrival order.
//!
//! A handler that moves the cursor can cause the OS to call the hook again
//! before the first callback returns.  [`HookDispatcher`] queues such nested
//! events and replays them once the handler is free.
//!
//! The hook callback must return within the OS hook timeout (a few hundred
//! milliseconds) or Windows silently removes the hook, so handlers must not
//! block.
//!
//! # Testability
//!
//! The [`InputHook`] trait lets tests drive the handler through
//! [`mock::MockInputHook`] without OS hooks.

pub use dpi_align_core::SampleDecision;

pub mod dispatch;
pub mod mock;

pub use dispatch::HookDispatcher;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsInputHook;

/// A raw input event produced by the capture hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputEvent {
    /// The cursor is about to move to an absolute screen position.
    MouseMove {
        /// Absolute X in virtual-desktop device pixels.
        x: i32,
        /// Absolute Y in virtual-desktop device pixels.
        y: i32,
        /// Milliseconds since system start (from the hook struct).
        time_ms: u32,
    },
    /// A key was pressed down.  Auto-repeat delivers this again while the
    /// key is held.
    KeyDown {
        /// Windows virtual-key code.
        vk_code: u8,
        time_ms: u32,
    },
    /// A key was released.
    KeyUp { vk_code: u8, time_ms: u32 },
}

/// Callback invoked for every captured event on the hook thread.
pub type EventHandler = Box<dyn FnMut(RawInputEvent) -> SampleDecision + Send>;

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to install mouse hook: {0}")]
    MouseHookInstallFailed(String),
    #[error("failed to install keyboard hook: {0}")]
    KeyboardHookInstallFailed(String),
    #[error("failed to spawn hook thread: {0}")]
    ThreadSpawnFailed(String),
    #[error("input hook is already running")]
    AlreadyRunning,
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Trait abstracting the OS input hook.
///
/// The production implementation uses Windows hooks; tests use
/// [`mock::MockInputHook`].
pub trait InputHook: Send {
    /// Installs the hooks and starts delivering events to `handler`.
    ///
    /// Returns once the hooks are live.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError`] if the hook is already running or the OS
    /// refuses to install it.
    fn start(&mut self, handler: EventHandler) -> Result<(), CaptureError>;

    /// Removes the hooks and waits for the hook thread to exit.
    ///
    /// Calling `stop` on a hook that is not running is a no-op.
    fn stop(&mut self);
}
