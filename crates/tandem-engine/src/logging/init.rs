use std::sync::Once;

use log::LevelFilter;

/// Crates that log per-call at info and drown out the app.
const NOISY_MODULES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Logger setup.
///
/// `RUST_LOG`, when set, replaces `level`/`noisy_level` entirely.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    /// Level applied to the GPU stack's internal crates.
    pub noisy_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            noisy_level: LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter string in `env_logger` syntax.
    pub fn filters(&self, rust_log: Option<&str>) -> String {
        if let Some(directives) = rust_log.filter(|s| !s.trim().is_empty()) {
            return directives.to_string();
        }

        let mut directives = self.level.to_string().to_lowercase();
        for module in NOISY_MODULES {
            directives.push_str(&format!(",{module}={}", self.noisy_level.to_string().to_lowercase()));
        }
        directives
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls do nothing.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filters = config.filters(rust_log.as_deref());

        env_logger::Builder::new()
            .parse_filters(&filters)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .init();

        log::debug!("logging initialized ({filters})");
    });
}
