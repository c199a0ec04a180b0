//! Process-wide logging setup on top of `log4rs`.
//!
//! The library only emits through the `log` facade; binaries and tests call
//! one of these once at start-up.

use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Configure logging to `{dir}/app.log`, rolled at 10 MiB keeping `retention` files (default 7).
///
/// If log4rs is already initialized the existing logger stays in place.
///
/// # Errors
/// Returns an error if the directory cannot be created or the appender cannot be built.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    std::fs::create_dir_all(&base)?;
    let keep = retention.unwrap_or(7);
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join("app.{}.log").display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join("app.log"), Box::new(policy))?;
    let config = Config::builder()
        .appender(Appender::builder().build("app", Box::new(appender)))
        .build(Root::builder().appender("app").build(parse_level(level)))?;
    let _ = log4rs::init_config(config);
    Ok(())
}

/// Configure logging from environment variables if present:
/// - ROWCSV_LOG_DIR
/// - ROWCSV_LOG_LEVEL
/// - ROWCSV_LOG_RETENTION
///
/// # Errors
/// See [`configure_logging`].
pub fn configure_from_env() -> Result<(), Box<dyn std::error::Error>> {
    configure_from_env_with_level(None)
}

/// Like [`configure_from_env`], but `level` wins over `ROWCSV_LOG_LEVEL` when given.
///
/// # Errors
/// See [`configure_logging`].
pub fn configure_from_env_with_level(
    level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::var("ROWCSV_LOG_DIR").ok().map(PathBuf::from);
    let env_level = std::env::var("ROWCSV_LOG_LEVEL").ok();
    let retention =
        std::env::var("ROWCSV_LOG_RETENTION").ok().and_then(|s| s.parse::<u32>().ok());
    configure_logging(dir.as_deref(), level.or(env_level.as_deref()), retention)
}
