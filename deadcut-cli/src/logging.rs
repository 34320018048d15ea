// ============================================================================
// deadcut-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialization for the deadcut binary
//
// The default filter is `info`, or `debug` with --verbose. RUST_LOG, when
// set, overrides both:
// - RUST_LOG=debug: Detailed debugging information
// - RUST_LOG=ffmpeg_log=trace: Every line ffmpeg writes

use log::LevelFilter;
use std::io::Write;

/// Returns the current local time formatted as "HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

/// Initializes the global logger.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                get_timestamp(),
                level_label(record.level()),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .init();

    log::debug!("Logger initialized with level: {level}");
}
