//! Runtime configuration.
//!
//! [`AlignerConfig`] holds every setting the aligner needs.  The binary
//! fills it from command-line arguments and `DPI_ALIGN_*` environment
//! variables; tests build it directly.  Nothing is persisted.

use dpi_align_core::{AlignMode, PairSelection};
use thiserror::Error;

use crate::application::align_cursor::DEFAULT_TOGGLE_VK;

/// Errors for invalid configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid scale '{0}': expected a finite number greater than 0")]
    InvalidScale(String),

    #[error("invalid virtual-key code '{0}': expected 0-255, decimal or 0x-prefixed hex")]
    InvalidKeyCode(String),

    #[error("left and right monitor indices are both {0}")]
    SameIndex(usize),

    #[error("toggle and reload keys are both virtual-key {0:#04x}")]
    KeyConflict(u8),
}

/// All runtime configuration for the aligner.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignerConfig {
    /// Which monitors form the pair, and scale overrides.
    pub selection: PairSelection,
    pub mode: AlignMode,
    /// Key that toggles alignment; `None` disables toggling.
    pub toggle_vk: Option<u8>,
    /// Key that re-runs monitor discovery; `None` (the default) disables it.
    pub reload_vk: Option<u8>,
    /// Print the monitor list and exit.
    pub list_only: bool,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            selection: PairSelection::default(),
            mode: AlignMode::Top,
            toggle_vk: Some(DEFAULT_TOGGLE_VK),
            reload_vk: None,
            list_only: false,
            log_level: "info".to_string(),
        }
    }
}

impl AlignerConfig {
    /// Checks cross-field constraints that the individual parsers cannot see.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sel = &self.selection;
        for scale in [sel.left_scale, sel.right_scale].into_iter().flatten() {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ConfigError::InvalidScale(scale.to_string()));
            }
        }
        if let (Some(l), Some(r)) = (sel.left_index, sel.right_index) {
            if l == r {
                return Err(ConfigError::SameIndex(l));
            }
        }
        if let (Some(t), Some(r)) = (self.toggle_vk, self.reload_vk) {
            if t == r {
                return Err(ConfigError::KeyConflict(t));
            }
        }
        Ok(())
    }
}

/// Parses a scale override such as `1.25`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidScale`] unless the value is a finite number > 0.
pub fn parse_scale(s: &str) -> Result<f64, ConfigError> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ConfigError::InvalidScale(s.to_string())),
    }
}

/// Parses a virtual-key code in decimal (`145`) or hex (`0x91`).
///
/// `0` means "no key" and yields `None`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidKeyCode`] if the text is not a number in `0..=255`.
pub fn parse_vk(s: &str) -> Result<Option<u8>, ConfigError> {
    let t = s.trim();
    let parsed = match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => t.parse::<u8>(),
    };
    match parsed {
        Ok(0) => Ok(None),
        Ok(vk) => Ok(Some(vk)),
        Err(_) => Err(ConfigError::InvalidKeyCode(s.to_string())),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
