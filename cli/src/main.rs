//! Texnouz Parking — operator console
//!
//! ```sh
//! # Run with default config (~/.config/texnouz-parking/config.toml)
//! parking-service
//!
//! # Custom config path
//! parking-service --config /etc/texnouz-parking/config.toml
//!
//! # Override slot counts
//! parking-service --car-slots 40 --bike-slots 15
//!
//! # Validate config without starting
//! parking-service --check
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use texnouz_parking::config::AppConfig;
use texnouz_parking::infrastructure::AuditLog;
use texnouz_parking::interfaces::Console;
use texnouz_parking::support::logging::init_tracing;
use texnouz_parking::{AppError, FeeCalculator, ParkingLot, ParkingService};

/// Texnouz Parking — interactive console for a small parking facility.
#[derive(Parser, Debug)]
#[command(
    name = "parking-service",
    version,
    about = "Parking lot entry, exit and fee console",
    long_about = "Texnouz Parking — assigns slots to cars and bikes, issues tickets \
                  and computes hourly fees on exit.\n\n\
                  Default config: ~/.config/texnouz-parking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the number of car slots.
    #[arg(long)]
    car_slots: Option<u32>,

    /// Override the number of bike slots.
    #[arg(long)]
    bike_slots: Option<u32>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Disable the audit log file.
    #[arg(long)]
    no_audit: bool,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(texnouz_parking::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(n) = cli.car_slots {
        config.lot.car_slots = n;
    }
    if let Some(n) = cli.bike_slots {
        config.lot.bike_slots = n;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.no_audit {
        config.audit.enabled = false;
    }

    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config.logging);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(ref e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        let fees = &config.fees;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Car slots   : {}", config.lot.car_slots);
        println!("   Bike slots  : {}", config.lot.bike_slots);
        println!("   Car rate    : {}/h", fees.format_amount(fees.car_rate_per_hour));
        println!("   Bike rate   : {}/h", fees.format_amount(fees.bike_rate_per_hour));
        println!("   Minimum fee : {}", fees.format_amount(fees.minimum_fee));
        if config.audit.enabled {
            println!("   Audit log   : {}", config.audit.path.display());
        } else {
            println!("   Audit log   : disabled");
        }
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Build service ──────────────────────────────────────────
    let lot = ParkingLot::new(config.lot.car_slots, config.lot.bike_slots);
    let service = ParkingService::shared(lot, FeeCalculator::new(config.fees.clone()));
    info!(
        car_slots = config.lot.car_slots,
        bike_slots = config.lot.bike_slots,
        "Parking lot ready"
    );

    let audit = if config.audit.enabled {
        match AuditLog::open(&config.audit.path) {
            Ok(log) => {
                info!("Audit log: {}", config.audit.path.display());
                Some(AuditLog::boxed(log))
            }
            Err(e) => {
                warn!(
                    "Cannot open audit log {}: {}. Continuing without it.",
                    config.audit.path.display(),
                    e
                );
                None
            }
        }
    } else {
        None
    };

    // ── Run console ────────────────────────────────────────────
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(service, audit, stdin.lock(), stdout.lock()).run()?;

    info!("Parking console shutdown complete");
    Ok(())
}
