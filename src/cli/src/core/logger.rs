use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Process-wide log setup. Library crates log through the `log` facade;
/// this routes those records to stderr.
pub struct Logger {
    debug: bool,
}

impl Logger {
    /// `--debug` forces debug level; otherwise `RUST_LOG` applies, falling
    /// back to warnings only. Later calls are ignored.
    pub fn init(debug: bool) {
        let _ = LOGGER.get_or_init(|| {
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
            if debug {
                builder.filter_level(log::LevelFilter::Debug);
            }
            let _ = builder
                .format_timestamp(None)
                .target(env_logger::Target::Stderr)
                .try_init();
            Logger { debug }
        });
    }

    pub fn is_debug() -> bool {
        LOGGER.get().is_some_and(|logger| logger.debug)
    }
}
