//! ovenprobe main entry point.
//!
//! Hexagonal architecture with a single event-driven consumer.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            CsvLog        JsonConfigFile       │
//! │  (Sensor+Display+Graph      (LogPort)     (ConfigPort)         │
//! │   +Indicator+Ticker)                                           │
//! │                                                                │
//! │  ticker thread ──┐   console thread ──┐                        │
//! │                  ▼                    ▼                        │
//! │  ──────────────── EventQueue (bounded) ──────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          MonitorService (single consumer)              │    │
//! │  │  MenuFsm · RecordingEngine · DisplayState              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use ovenprobe::adapters::config_file::JsonConfigFile;
use ovenprobe::adapters::console::{self, TextDisplay};
use ovenprobe::adapters::csv_log::CsvLog;
use ovenprobe::adapters::hardware::{HardwareAdapter, SimPin};
use ovenprobe::adapters::time::MonotonicClock;
use ovenprobe::app::ports::{ConfigError, ConfigPort};
use ovenprobe::app::service::MonitorService;
use ovenprobe::config::SystemConfig;
use ovenprobe::drivers::button::ButtonWatcher;
use ovenprobe::drivers::status_led::ActivityLed;
use ovenprobe::drivers::ticker::{self, TickerConfig};
use ovenprobe::events::EVENTS;
use ovenprobe::pins;
use ovenprobe::sensors::thermocouple::ThermocoupleProbe;

/// Oven thermometer: samples a thermocouple, logs to CSV, graphs the run.
#[derive(Parser, Debug)]
#[command(name = "ovenprobe", version)]
struct Args {
    /// JSON config file
    #[arg(long, default_value = "/etc/ovenprobe.json")]
    config: PathBuf,

    /// CSV sample log (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Graph output (overrides the config file)
    #[arg(long)]
    graph_file: Option<PathBuf>,

    /// Smooth single-sample spikes on the graph
    #[arg(long)]
    glitchless: bool,
}

fn load_config(args: &Args) -> Result<SystemConfig> {
    let file = JsonConfigFile::new(&args.config);
    let mut config = match file.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            warn!("no config at {}, using defaults", args.config.display());
            SystemConfig::default()
        }
        Err(e) => return Err(e).with_context(|| format!("loading {}", args.config.display())),
    };

    if let Some(path) = &args.log_file {
        config.log_path = path.clone();
    }
    if let Some(path) = &args.graph_file {
        config.graph_path = path.clone();
    }
    config.glitch_filter |= args.glitchless;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("command-line overrides")?;
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("ovenprobe v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let args = Args::parse();
    let config = load_config(&args)?;
    let clock = MonotonicClock::new();

    // ── 3. Peripherals and log ────────────────────────────────
    let mut hw = HardwareAdapter::new(
        ThermocoupleProbe::new(pins::PROBE_CLK_GPIO, pins::PROBE_CS_GPIO, pins::PROBE_DO_GPIO),
        TextDisplay::new(std::io::stdout()),
        config.graph_path.clone(),
        ActivityLed::new(SimPin::new(pins::ACTIVITY_LED_GPIO)),
    );
    let mut log = CsvLog::open(&config.log_path)
        .with_context(|| format!("opening {}", config.log_path.display()))?;

    // ── 4. Seed sample and first screen ───────────────────────
    let mut service = MonitorService::boot(&config, &mut hw, &mut log, clock.now_ms())
        .context("starting recording")?;

    // ── 5. Event producers ────────────────────────────────────
    ticker::spawn(TickerConfig {
        sampling: Duration::from_secs(config.committed().interval_secs() as u64),
        display: Duration::from_secs(config.display_refresh_secs as u64),
    })
    .context("spawning ticker thread")?;
    console::spawn_input_reader(ButtonWatcher::new(config.button_debounce_ms), clock)
        .context("spawning console reader")?;

    // ── 6. Main loop ──────────────────────────────────────────
    service
        .run(&EVENTS, &mut hw, &mut log, || clock.now_ms())
        .context("main loop")?;

    info!("ovenprobe stopped");
    Ok(())
}
