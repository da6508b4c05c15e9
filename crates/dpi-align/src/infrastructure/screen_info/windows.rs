//! Windows display enumeration via `EnumDisplayMonitors`, `GetMonitorInfoW`
//! and `GetDpiForMonitor`.

use dpi_align_core::{DisplayRecord, PhysicalBounds, REFERENCE_DPI};
use tracing::{debug, warn};
use windows::{
    Win32::Foundation::{BOOL, LPARAM, RECT},
    Win32::Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW},
    Win32::UI::HiDpi::{
        GetDpiForMonitor, SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE,
        DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, MDT_EFFECTIVE_DPI,
    },
};

use crate::application::discover_monitors::{DisplayEnumerator, EnumerationError};

/// Declares the process per-monitor DPI aware (V2, falling back to V1).
///
/// Fails harmlessly if awareness was already set, e.g. through a manifest.
pub fn enable_dpi_awareness() {
    // SAFETY: Process-wide setting with no pointer arguments.
    unsafe {
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_ok() {
            debug!("per-monitor DPI awareness v2 enabled");
            return;
        }
        if let Err(e) = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE) {
            warn!(error = %e, "could not set per-monitor DPI awareness; coordinates may be virtualised");
        }
    }
}

/// Windows implementation of [`DisplayEnumerator`].
pub struct WindowsScreenEnumerator;

impl WindowsScreenEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsScreenEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayEnumerator for WindowsScreenEnumerator {
    fn enumerate_displays(&self) -> Result<Vec<DisplayRecord>, EnumerationError> {
        let mut records: Vec<DisplayRecord> = Vec::new();

        // SAFETY: `lpfn` is a valid function pointer with the correct signature.
        // `lParam` is a raw pointer to `records` which outlives this call.
        // The callback is synchronous and called only within `EnumDisplayMonitors`.
        // `HDC::default()` (null) means enumerate all monitors on the virtual desktop.
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(monitor_enum_proc),
                LPARAM(&mut records as *mut Vec<DisplayRecord> as isize),
            )
        };

        if !ok.as_bool() {
            return Err(EnumerationError(
                "EnumDisplayMonitors failed".to_string(),
            ));
        }
        if records.is_empty() {
            return Err(EnumerationError(
                "EnumDisplayMonitors returned no monitors".to_string(),
            ));
        }

        Ok(records)
    }
}

/// Decodes a NUL-terminated UTF-16 device name.
fn device_name(raw: &[u16]) -> String {
    let len = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    String::from_utf16_lossy(&raw[..len])
}

/// Win32 monitor enumeration callback.
///
/// # Safety
///
/// Called by Win32 inside `EnumDisplayMonitors`. `lparam` must be a valid
/// pointer to `Vec<DisplayRecord>` for the duration of the enumeration call.
unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _lprc_clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let records = &mut *(lparam.0 as *mut Vec<DisplayRecord>);

    // SAFETY: MONITORINFOEXW is a Plain Old Data struct; zero initialization is valid.
    let mut info: MONITORINFOEXW = std::mem::zeroed();
    info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: `hmonitor` is a valid handle provided by Win32.
    if !GetMonitorInfoW(hmonitor, &mut info.monitorInfo).as_bool() {
        warn!("GetMonitorInfoW failed; skipping display");
        return BOOL(1);
    }

    let rc = &info.monitorInfo.rcMonitor;
    let bounds = PhysicalBounds::new(rc.left, rc.top, rc.right, rc.bottom);
    let name = device_name(&info.szDevice);

    let mut dpi_x = 0u32;
    let mut dpi_y = 0u32;
    // SAFETY: Output pointers refer to live locals.
    if let Err(e) = GetDpiForMonitor(hmonitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) {
        warn!(monitor = %name, error = %e, "GetDpiForMonitor failed; assuming {REFERENCE_DPI} DPI");
        dpi_x = 0;
    }

    debug!(monitor = %name, ?bounds, dpi = dpi_x, "display enumerated");
    records.push(DisplayRecord::from_dpi(name, bounds, dpi_x));

    BOOL(1) // continue enumeration
}

// ── Tests ─────────────────────────────────────────────────────────────────────
