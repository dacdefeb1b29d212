use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

/// Log levels representing increasing verbosity.
///
/// Setting a level enables that level and all less verbose levels below it:
///
/// - **Silent (0)**: No logging output
/// - **Error (1)**: Only error messages
/// - **Warn (2)**: Warning and error messages
/// - **Info (3)**: Informational, warning, and error messages (default)
/// - **Debug (4)**: All messages
///
/// The level can be set via the `LOG_LEVEL` environment variable or at runtime
/// using `set_log_level()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Level {
    /// Parse a log level from a string (case insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" => Some(Level::Silent),
            "error" => Some(Level::Error),
            "warn" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Silent => "Silent",
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Info => "Info",
            Level::Debug => "Debug",
        }
    }
}

pub struct Logger {
    log_file: Option<PathBuf>,
    disable_log: bool,
    enable_print_log: bool,
    level: Mutex<Level>,
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(default)
}

impl Logger {
    pub fn new() -> Self {
        let disable_log = env_flag("DISABLE_LOG", false);
        let enable_print_log = env_flag("ENABLE_PRINT_LOG", true);

        let log_file = std::env::var("LOG_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| Level::from_str(&v))
            .unwrap_or(Level::Info);

        Logger {
            log_file,
            disable_log,
            enable_print_log,
            level: Mutex::new(level),
        }
    }

    pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(())
    }

    fn write_to_file(&self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        if self.disable_log {
            return Ok(());
        }
        let Some(log_file) = &self.log_file else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3fZ");
        let log_line = format!("[{}] {}\n", timestamp, message);

        file.write_all(log_line.as_bytes())?;

        Ok(())
    }

    fn log(&self, level: Level, msg: &str) {
        if *self.level.lock() < level {
            return;
        }

        if self.enable_print_log {
            match level {
                Level::Debug => tracing::debug!("{}", msg),
                Level::Info => tracing::info!("{}", msg),
                Level::Warn => tracing::warn!("{}", msg),
                Level::Error => tracing::error!("{}", msg),
                Level::Silent => {}
            }
        }

        let formatted_msg = format!("{}: {}", level.as_str().to_uppercase(), msg);
        if let Err(e) = self.write_to_file(&formatted_msg) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }

    pub fn get_level(&self) -> Level {
        *self.level.lock()
    }

    pub fn set_level(&self, new_level: Level) {
        *self.level.lock() = new_level;
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new()
    }
}

pub static LOGGER: OnceLock<Logger> = OnceLock::new();

fn with_logger<F, R>(f: F) -> R
where
    F: FnOnce(&Logger) -> R,
{
    f(LOGGER.get_or_init(Logger::new))
}

pub fn info(msg: &str) {
    with_logger(|logger| logger.log(Level::Info, msg));
}

pub fn warn(msg: &str) {
    with_logger(|logger| logger.log(Level::Warn, msg));
}

pub fn error(msg: &str) {
    with_logger(|logger| logger.log(Level::Error, msg));
}

pub fn debug(msg: &str) {
    with_logger(|logger| logger.log(Level::Debug, msg));
}

pub fn get_log_level() -> Level {
    with_logger(|logger| logger.get_level())
}

pub fn set_log_level(level: Level) {
    with_logger(|logger| logger.set_level(level));
}

/// Set the log level from a string (case insensitive).
/// Returns false if the string is not a valid level.
pub fn set_log_level_str(level_str: &str) -> bool {
    if let Some(level) = Level::from_str(level_str) {
        set_log_level(level);
        true
    } else {
        false
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(Level::from_str("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::from_str("silent"), Some(Level::Silent));
        assert_eq!(Level::from_str("verbose"), None);
        assert!(Level::Warn < Level::Info);
    }

    #[test]
    fn test_set_log_level_str() {
        assert!(!set_log_level_str("verbose"));
        assert!(set_log_level_str("Warn"));
        assert_eq!(get_log_level(), Level::Warn);
        set_log_level(Level::Info);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
        assert_eq!(format_duration(Duration::from_millis(900)), "00:00:00");
    }
}
