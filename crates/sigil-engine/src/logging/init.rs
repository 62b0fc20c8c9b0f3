use std::sync::Once;

static LOGGER: Once = Once::new();

/// Tunables for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter directives in `env_logger` syntax, e.g.
    /// `"sigil_engine=debug"`. `None` defers to `RUST_LOG`, and with
    /// neither set everything logs at info.
    pub filter: Option<String>,
    /// Caps wgpu's and naga's own modules at warn. Their per-resource
    /// debug output drowns frame-loop diagnostics; a directive naming one
    /// of those modules still overrides the cap.
    pub quiet_gpu_internals: bool,
    /// ANSI coloring behavior.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            filter: None,
            quiet_gpu_internals: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Installs the global `env_logger` backend.
///
/// Only the first call configures anything; later calls are no-ops, so
/// embedders and tests may both call it freely. Call it before building
/// the engine or construction-time messages go nowhere.
pub fn init_logging(options: LoggingOptions) {
    LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if options.quiet_gpu_internals {
            for module in ["wgpu_core", "wgpu_hal", "naga"] {
                builder.filter_module(module, log::LevelFilter::Warn);
            }
        }

        match options.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(options.write_style);
        builder.init();
    });
}
