//! Logging setup for the dupefinder binary.
//!
//! The library only talks to the `log` facade; this module installs the
//! `env_logger` backend for the command line tool. Logs always go to
//! stderr so that results on stdout stay machine-readable.
//!
//! | flags  | level |
//! |--------|-------|
//! | `-q`   | error |
//! | (none) | warn  |
//! | `-v`   | info  |
//! | `-vv`  | debug |
//! | `-vvv` | trace |
//!
//! `RUST_LOG` directives are applied on top of the flag level, so
//! `RUST_LOG=dupefinder::duplicates=trace` narrows tracing to one module.
//!
//! Skip warnings from [`crate::scanner::LogSink`] are logged at warn level
//! and remain visible by default.

use std::env;
use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Install the global logger.
///
/// Calling it again after a logger is installed has no effect.
///
/// # Example
///
/// ```rust,no_run
/// use dupefinder::logging::init_logging;
///
/// init_logging(1, false);
/// log::info!("shown with -v");
/// log::debug!("hidden until -vv");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = determine_level(verbose, quiet);
    let directives = env::var("RUST_LOG").ok();

    let mut builder = Builder::new();
    builder.filter_level(level).target(Target::Stderr);
    if let Some(filters) = &directives {
        builder.parse_filters(filters);
    }

    // Module paths and timestamps only help once debugging starts
    let detailed = verbose >= 2;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if detailed {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        }
    });

    if builder.try_init().is_ok() {
        log::debug!(
            "Logging at {} (RUST_LOG: {})",
            current_level_name(),
            directives.as_deref().unwrap_or("unset")
        );
    }
}

/// Map CLI flags to a level filter. `quiet` wins over `verbose`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Name of the most verbose level currently enabled.
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
