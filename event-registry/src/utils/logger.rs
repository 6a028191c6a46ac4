//! Logging Infrastructure
//!
//! Console logging plus optional daily rotating files:
//! - `app/`: everything except security events
//! - `security/`: auth and ownership denials (`target: "security"`)

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor a level is given
pub const DEFAULT_FILTER: &str = "event_registry=info,tower_http=info";

/// Initialize the logging system
///
/// `RUST_LOG` wins over `level` when set. With `log_dir`, JSON lines are also
/// written to `<log_dir>/app` and `<log_dir>/security`, rotated daily.
pub fn init_logger_with_file(
    level: Option<&str>,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let level = level.unwrap_or(DEFAULT_FILTER).to_string();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let mut file_layers = Vec::new();
    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let security_log_dir = log_dir.join("security");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&security_log_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        file_layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "security"
                }))
                .boxed(),
        );

        let security_log = RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
        file_layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(security_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "security"
                }))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layers)
        .try_init()?;

    Ok(())
}

/// Initialize console-only logging
pub fn init_logger(level: Option<&str>) -> anyhow::Result<()> {
    init_logger_with_file(level, false, None)
}

/// Security log helper - records auth and ownership denials
///
/// # Examples
/// ```ignore
/// security_log!(WARN, "permission_denied", user_id = "7", required = "UpdateCatalog");
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}
