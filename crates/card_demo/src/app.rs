use anyhow::Context;
use card_flip::{CardFlipSettings, config::load_section};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::filter_fn, fmt, prelude::*};

pub const APP_ID: &str = "card_demo";
pub const LOG_DEMO: &str = "card_demo";

/// Process-wide infrastructure: settings and the logging backend.
///
/// The log guard must outlive the Bevy app, otherwise buffered lines of the
/// file layer are lost on exit.
pub struct AppContext {
    pub settings: DemoSettings,
    pub settings_file: PathBuf,
    _log_guard: WorkerGuard,
}

impl AppContext {
    pub fn init() -> anyhow::Result<Self> {
        let out_dir = out_dir();
        let log_guard = init_logging(&out_dir.join("logs"))?;

        let settings_file = std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(default_settings_file);
        let settings = DemoSettings::load_or_default(&settings_file)?;

        Ok(Self {
            settings,
            settings_file,
            _log_guard: log_guard,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RngSettings {
    /// Fixed seed for the shake offsets; entropy when absent
    pub seed: Option<u64>,
}

impl RngSettings {
    pub const SECTION: &'static str = "rng";
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSettings {
    pub card: CardFlipSettings,
    pub rng: RngSettings,
}

impl DemoSettings {
    pub fn parse(source: &str) -> anyhow::Result<Self> {
        Ok(Self {
            card: load_section(source, CardFlipSettings::SECTION)?,
            rng: load_section(source, RngSettings::SECTION)?,
        })
    }

    /// Reads the settings file; a file that does not exist yields defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(target: LOG_DEMO, "no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings =
            Self::parse(&source).with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(target: LOG_DEMO, "loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn out_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(".out")
    }
    #[cfg(not(debug_assertions))]
    {
        PathBuf::from(".out")
    }
}

fn default_settings_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("settings.toml")
}

fn init_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let file_appender =
        tracing_appender::rolling::never(log_dir, format!("{APP_ID}.{timestamp}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    #[cfg(debug_assertions)]
    let level = LevelFilter::INFO;

    #[cfg(not(debug_assertions))]
    let level = LevelFilter::WARN;

    // Separate layer: file (non-blocking) + console (stdout)
    let file_layer = fmt::Layer::default()
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    let console_layer = fmt::Layer::default()
        .with_target(true)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("installing the tracing subscriber")?;

    Ok(guard)
}
