//! Unified logging module for the SigFig tools
//!
//! Console logging on stderr (stdout is reserved for results), with the
//! bracketed level format and a runtime-adjustable filter.

use std::sync::{Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::error::{Error, Result};

/// Custom format for log level with brackets: `[INFO]`, `[WARN]`, etc.
fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

/// Custom event formatter that outputs: `timestamp [LEVEL] message`
///
/// Example output: `2025-12-02T00:50:44.809Z [INFO] Session started`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::TRACE => "\x1b[35m", // magenta
                Level::DEBUG => "\x1b[34m", // blue
                Level::INFO => "\x1b[32m",  // green
                Level::WARN => "\x1b[33m",  // yellow
                Level::ERROR => "\x1b[31m", // red
            };
            write!(writer, "{}{}\x1b[0m ", color, format_level(&level))?;
        } else {
            write!(writer, "{} ", format_level(&level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

// Dynamic log level reload support
type EnvFilterReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;
static LOG_FILTER_HANDLE: OnceLock<EnvFilterReloadHandle> = OnceLock::new();
static CURRENT_LOG_LEVEL: OnceLock<Mutex<String>> = OnceLock::new();

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Application name (e.g., "sigcalc")
    pub app_name: String,
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON lines instead of the bracketed format
    pub enable_json: bool,
    /// Colored level tags
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "unknown".to_string(),
            level: "warn".to_string(),
            enable_json: false,
            ansi: true,
        }
    }
}

/// Filter directive: `RUST_LOG` wins over the configured level
fn filter_directive(level: &str, rust_log: Option<String>) -> String {
    match rust_log {
        Some(env) if !env.trim().is_empty() => env,
        _ => level.to_string(),
    }
}

/// Initialize logging system with configuration
pub fn init_with_config(config: LogConfig) -> Result<()> {
    let directive = filter_directive(&config.level, std::env::var("RUST_LOG").ok());
    let env_filter = EnvFilter::try_new(&directive)
        .map_err(|e| Error::Logging(format!("Invalid log filter '{}': {}", directive, e)))?;

    // Wrap EnvFilter with reload::Layer for dynamic level changes
    let (reload_filter, reload_handle) = reload::Layer::new(env_filter);
    let _ = LOG_FILTER_HANDLE.set(reload_handle);
    let _ = CURRENT_LOG_LEVEL.set(Mutex::new(directive));

    let registry = tracing_subscriber::registry().with(reload_filter);

    let console_layer = if config.enable_json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .event_format(BracketedLevelFormat)
            .boxed()
    };

    registry
        .with(console_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::debug!("Logging: {}", config.app_name);
    Ok(())
}

/// Dynamically set log filter level at runtime
///
/// # Arguments
/// * `level` - Log level string (e.g., "debug", "info") or a full filter
///   spec (e.g., "warn,sigfig_calc=debug")
pub fn set_log_level(level: &str) -> std::result::Result<(), String> {
    let handle = LOG_FILTER_HANDLE
        .get()
        .ok_or("Logging not initialized with reload support")?;

    let new_filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    handle
        .reload(new_filter)
        .map_err(|e| format!("Failed to reload log filter: {}", e))?;

    if let Some(current) = CURRENT_LOG_LEVEL.get() {
        if let Ok(mut guard) = current.lock() {
            *guard = level.to_string();
        }
    }

    tracing::info!("Log level changed to: {}", level);
    Ok(())
}

/// Get current log filter level
pub fn get_log_level() -> String {
    CURRENT_LOG_LEVEL
        .get()
        .and_then(|m| m.lock().ok())
        .map(|guard| guard.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(&Level::INFO), "[INFO]");
        assert_eq!(format_level(&Level::ERROR), "[ERROR]");
        assert_eq!(format_level(&Level::TRACE), "[TRACE]");
    }

    #[test]
    fn test_filter_directive_priority() {
        assert_eq!(filter_directive("warn", None), "warn");
        assert_eq!(
            filter_directive("warn", Some("sigfig_calc=trace".to_string())),
            "sigfig_calc=trace"
        );
        assert_eq!(filter_directive("debug", Some("  ".to_string())), "debug");
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert!(!config.enable_json);
    }
}
