//! Windows low-level mouse and keyboard hook implementation.
//!
//! Installs WH_MOUSE_LL (and optionally WH_KEYBOARD_LL) on a dedicated
//! thread running a Win32 message loop at THREAD_PRIORITY_TIME_CRITICAL.
//! The [`EventHandler`] lives in that thread's [`HookDispatcher`] so the hook
//! callbacks can reach it without locking.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::{
    GetCurrentThread, GetCurrentThreadId, SetThreadPriority, THREAD_PRIORITY_TIME_CRITICAL,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, UnhookWindowsHookEx, HC_ACTION, KBDLLHOOKSTRUCT, MSG, MSLLHOOKSTRUCT,
    PM_NOREMOVE, WH_KEYBOARD_LL, WH_MOUSE_LL, WM_KEYDOWN, WM_KEYUP, WM_MOUSEMOVE, WM_QUIT,
    WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use super::{CaptureError, EventHandler, HookDispatcher, InputHook, RawInputEvent, SampleDecision};

thread_local! {
    /// Handler for the hook thread.  Only the hook thread ever touches it.
    static DISPATCHER: HookDispatcher = HookDispatcher::new();
}

/// Windows low-level input hook.
pub struct WindowsInputHook {
    capture_keyboard: bool,
    thread: Option<JoinHandle<()>>,
    thread_id: Option<u32>,
}

impl WindowsInputHook {
    /// Creates an unstarted hook.
    ///
    /// With `capture_keyboard` set, key presses and releases are delivered
    /// as [`RawInputEvent::KeyDown`] and [`RawInputEvent::KeyUp`] (used for
    /// the toggle and reload keys).
    pub fn new(capture_keyboard: bool) -> Self {
        Self {
            capture_keyboard,
            thread: None,
            thread_id: None,
        }
    }
}

impl InputHook for WindowsInputHook {
    fn start(&mut self, handler: EventHandler) -> Result<(), CaptureError> {
        if self.thread.is_some() {
            return Err(CaptureError::AlreadyRunning);
        }

        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, CaptureError>>();
        let capture_keyboard = self.capture_keyboard;

        let handle = thread::Builder::new()
            .name("dpi-align-hook".to_string())
            .spawn(move || run_hook_message_loop(handler, capture_keyboard, ready_tx))
            .map_err(|e| CaptureError::ThreadSpawnFailed(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                self.thread = Some(handle);
                self.thread_id = Some(thread_id);
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(CaptureError::ThreadSpawnFailed(
                    "hook thread exited before reporting readiness".to_string(),
                ))
            }
        }
    }

    fn stop(&mut self) {
        let Some(handle) = self.thread.take() else {
            return;
        };
        if let Some(thread_id) = self.thread_id.take() {
            // SAFETY: Posting WM_QUIT to a thread we own; its queue exists
            // because the thread peeked it before reporting readiness.
            if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            {
                warn!(error = %e, "failed to post WM_QUIT to hook thread");
            }
        }
        if handle.join().is_err() {
            warn!("hook thread panicked");
        }
    }
}

impl Drop for WindowsInputHook {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Entry point for the dedicated Win32 message loop thread.
fn run_hook_message_loop(
    handler: EventHandler,
    capture_keyboard: bool,
    ready: Sender<Result<u32, CaptureError>>,
) {
    DISPATCHER.with(|d| d.install(handler));

    let mut msg = MSG::default();
    // SAFETY: Plain Win32 calls on the current thread.  PeekMessageW creates
    // the message queue so a WM_QUIT posted by `stop` is never lost.
    unsafe {
        let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
        if let Err(e) = SetThreadPriority(GetCurrentThread(), THREAD_PRIORITY_TIME_CRITICAL) {
            warn!(error = %e, "could not raise hook thread priority");
        }
    }

    // SAFETY: The hook procedures are `extern "system"` functions with the
    // HOOKPROC signature; this thread runs the message loop below.
    let mouse_hook = match unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), None, 0) }
    {
        Ok(h) => h,
        Err(e) => {
            let _ = ready.send(Err(CaptureError::MouseHookInstallFailed(e.to_string())));
            return;
        }
    };

    let keyboard_hook = if capture_keyboard {
        // SAFETY: As above.
        match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) } {
            Ok(h) => Some(h),
            Err(e) => {
                // SAFETY: `mouse_hook` was installed by this thread.
                unsafe {
                    let _ = UnhookWindowsHookEx(mouse_hook);
                }
                let _ = ready.send(Err(CaptureError::KeyboardHookInstallFailed(e.to_string())));
                return;
            }
        }
    } else {
        None
    };

    // SAFETY: No preconditions.
    let thread_id = unsafe { GetCurrentThreadId() };
    let _ = ready.send(Ok(thread_id));
    debug!(thread_id, capture_keyboard, "input hooks installed");

    // Win32 message loop; blocks until WM_QUIT is posted.
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            DispatchMessageW(&msg);
        }
        let _ = UnhookWindowsHookEx(mouse_hook);
        if let Some(h) = keyboard_hook {
            let _ = UnhookWindowsHookEx(h);
        }
    }

    DISPATCHER.with(HookDispatcher::clear);
    debug!("input hooks removed");
}

/// Runs the thread-local handler.  Re-entrant calls are queued and replayed
/// by the dispatcher, so a warp echo still reaches the crossing detector.
fn dispatch(event: RawInputEvent) -> SampleDecision {
    DISPATCHER.with(|d| d.dispatch(event))
}

/// Low-level mouse hook callback.
///
/// # Safety
///
/// Called by Windows from the hook message loop thread; must return quickly.
unsafe extern "system" fn mouse_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION as i32 && w_param.0 as u32 == WM_MOUSEMOVE {
        // SAFETY: l_param points to a MSLLHOOKSTRUCT when n_code == HC_ACTION.
        let mhs = &*(l_param.0 as *const MSLLHOOKSTRUCT);
        let event = RawInputEvent::MouseMove {
            x: mhs.pt.x,
            y: mhs.pt.y,
            time_ms: mhs.time,
        };
        if dispatch(event) == SampleDecision::Consume {
            return LRESULT(1);
        }
    }

    // SAFETY: Forward to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}

/// Low-level keyboard hook callback.  Key events are observed, never swallowed.
///
/// # Safety
///
/// Called by Windows from the hook message loop thread; must return quickly.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION as i32 {
        let msg = w_param.0 as u32;
        // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
        let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);
        let vk_code = kbs.vkCode as u8;
        let event = match msg {
            WM_KEYDOWN | WM_SYSKEYDOWN => Some(RawInputEvent::KeyDown {
                vk_code,
                time_ms: kbs.time,
            }),
            WM_KEYUP | WM_SYSKEYUP => Some(RawInputEvent::KeyUp {
                vk_code,
                time_ms: kbs.time,
            }),
            _ => None,
        };
        if let Some(event) = event {
            dispatch(event);
        }
    }

    // SAFETY: Forward to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}
