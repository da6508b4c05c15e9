//! DPI-Align: keeps the cursor at the same perceived height when it crosses
//! between two side-by-side monitors with different scale factors.
//!
//! # Usage
//!
//! ```text
//! dpi-align [OPTIONS]
//!
//! Options:
//!   --list                 Print the detected monitors and exit
//!   --left <N>             Index of the left monitor (see --list) [default: 0]
//!   --right <M>            Index of the right monitor [default: 1]
//!   --left-scale <S>       Override the left monitor's scale (e.g. 1.0)
//!   --right-scale <S>      Override the right monitor's scale (e.g. 1.25)
//!   --mode <top|center>    Vertical alignment reference [default: top]
//!   --toggle-key <VK>      Virtual-key code toggling alignment, 0 = none [default: 0x91]
//!   --reload-key <VK>      Virtual-key code re-detecting monitors, 0 = none [default: 0]
//!   --log-level <LEVEL>    Log filter when RUST_LOG is unset [default: info]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Option          |
//! |--------------------------|-----------------|
//! | `DPI_ALIGN_LEFT`         | `--left`        |
//! | `DPI_ALIGN_RIGHT`        | `--right`       |
//! | `DPI_ALIGN_LEFT_SCALE`   | `--left-scale`  |
//! | `DPI_ALIGN_RIGHT_SCALE`  | `--right-scale` |
//! | `DPI_ALIGN_MODE`         | `--mode`        |
//! | `DPI_ALIGN_TOGGLE_KEY`   | `--toggle-key`  |
//! | `DPI_ALIGN_RELOAD_KEY`   | `--reload-key`  |
//! | `DPI_ALIGN_LOG_LEVEL`    | `--log-level`   |
//!
//! CLI args take precedence when both are present.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dpi_align::config::{parse_scale, parse_vk, AlignerConfig};
use dpi_align_core::{AlignMode, PairSelection};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// DPI-aware cursor alignment between two side-by-side monitors.
#[derive(Debug, Parser)]
#[command(
    name = "dpi-align",
    about = "Keeps the cursor's perceived height when crossing between monitors with different DPI",
    version
)]
struct Cli {
    /// Print the detected monitors with their indices and exit.
    #[arg(long)]
    list: bool,

    /// Index of the left monitor, as shown by --list.
    #[arg(long, env = "DPI_ALIGN_LEFT")]
    left: Option<usize>,

    /// Index of the right monitor, as shown by --list.
    #[arg(long, env = "DPI_ALIGN_RIGHT")]
    right: Option<usize>,

    /// Replaces the left monitor's detected scale factor.
    #[arg(long, env = "DPI_ALIGN_LEFT_SCALE", value_parser = parse_scale)]
    left_scale: Option<f64>,

    /// Replaces the right monitor's detected scale factor.
    #[arg(long, env = "DPI_ALIGN_RIGHT_SCALE", value_parser = parse_scale)]
    right_scale: Option<f64>,

    /// Which vertical reference point stays aligned: `top` or `center`.
    #[arg(long, default_value_t = AlignMode::Top, env = "DPI_ALIGN_MODE")]
    mode: AlignMode,

    /// Virtual-key code that toggles alignment (decimal or 0x hex); 0 disables.
    #[arg(long, default_value = "0x91", env = "DPI_ALIGN_TOGGLE_KEY")]
    toggle_key: String,

    /// Virtual-key code that re-detects the monitors (decimal or 0x hex); 0 disables.
    #[arg(long, default_value = "0", env = "DPI_ALIGN_RELOAD_KEY")]
    reload_key: String,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info", env = "DPI_ALIGN_LOG_LEVEL")]
    log_level: String,
}

impl Cli {
    /// Converts the parsed CLI arguments into a validated [`AlignerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--toggle-key` or `--reload-key` is not a valid
    /// key code or the resulting configuration is inconsistent.
    fn into_config(self) -> anyhow::Result<AlignerConfig> {
        let toggle_vk = parse_vk(&self.toggle_key)
            .with_context(|| format!("invalid --toggle-key '{}'", self.toggle_key))?;
        let reload_vk = parse_vk(&self.reload_key)
            .with_context(|| format!("invalid --reload-key '{}'", self.reload_key))?;

        let config = AlignerConfig {
            selection: PairSelection {
                left_index: self.left,
                right_index: self.right,
                left_scale: self.left_scale,
                right_scale: self.right_scale,
            },
            mode: self.mode,
            toggle_vk,
            reload_vk,
            list_only: self.list,
            log_level: self.log_level,
        };
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Installs the `fmt` subscriber.  `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_level);
    run(config).await
}

/// Discovers the monitors, installs the hooks and runs until Ctrl+C.
#[cfg(target_os = "windows")]
async fn run(config: AlignerConfig) -> anyhow::Result<()> {
    use std::sync::Arc;

    use dpi_align::application::align_cursor::AlignCursorUseCase;
    use dpi_align::application::discover_monitors::{discover, format_monitor_list, list_monitors};
    use dpi_align::infrastructure::cursor::WindowsCursorMover;
    use dpi_align::infrastructure::input_capture::{InputHook, WindowsInputHook};
    use dpi_align::infrastructure::screen_info::{enable_dpi_awareness, NativeScreenEnumerator};
    use tracing::info;

    // Must precede the first enumeration or coordinates are virtualised.
    enable_dpi_awareness();
    let enumerator = Arc::new(NativeScreenEnumerator::new());

    if config.list_only {
        let monitors =
            list_monitors(enumerator.as_ref()).context("failed to enumerate monitors")?;
        print!("{}", format_monitor_list(&monitors));
        return Ok(());
    }

    let pair =
        discover(enumerator.as_ref(), &config.selection).context("monitor discovery failed")?;
    for (role, m) in [("left", pair.left()), ("right", pair.right())] {
        let b = m.bounds();
        info!(
            role,
            name = %m.name(),
            left = b.left,
            top = b.top,
            right = b.right,
            bottom = b.bottom,
            scale = m.scale(),
            norm_top = m.norm_top(),
            norm_height = m.norm_height(),
            "monitor"
        );
    }

    let mut use_case =
        AlignCursorUseCase::new(pair, Arc::new(WindowsCursorMover::new()), config.mode)
            .with_toggle_key(config.toggle_vk)
            .with_reload_key(config.reload_vk)
            .with_monitor_source(enumerator, config.selection.clone());

    let capture_keyboard = config.toggle_vk.is_some() || config.reload_vk.is_some();
    let mut hook = WindowsInputHook::new(capture_keyboard);
    hook.start(Box::new(move |event| use_case.handle_event(event)))
        .context("failed to install input hooks")?;
    info!(
        mode = %config.mode,
        toggle_vk = ?config.toggle_vk,
        reload_vk = ?config.reload_vk,
        "dpi-align running; press Ctrl+C to exit"
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    info!("received Ctrl+C; removing hooks");
    hook.stop();

    info!("dpi-align stopped");
    Ok(())
}

#[cfg(not(target_os = "windows"))]
async fn run(_config: AlignerConfig) -> anyhow::Result<()> {
    use dpi_align::infrastructure::input_capture::CaptureError;

    Err(CaptureError::UnsupportedPlatform(std::env::consts::OS.to_string()).into())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
