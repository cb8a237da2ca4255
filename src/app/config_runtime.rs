use anyhow::Result;
use doicite_core::cite::DEFAULT_CONCURRENCY;
use doicite_core::resolver::{
    CrossrefResolver, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS,
    HttpTimeouts,
};

use crate::app_config::FileConfig;
use crate::cli::Cli;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Effective settings after merging CLI flags over file config over defaults.
#[derive(Debug, Clone)]
pub(crate) struct RuntimeSettings {
    pub(crate) registry_url: String,
    pub(crate) style: Option<String>,
    pub(crate) timeouts: HttpTimeouts,
    pub(crate) concurrency: usize,
    pub(crate) ask_to_validate: bool,
    pub(crate) quiet: bool,
}

impl RuntimeSettings {
    /// Style for a command: its own `-s` flag, then the configured default.
    pub(crate) fn style_for<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.style.as_deref())
    }

    pub(crate) fn build_resolver(&self) -> Result<CrossrefResolver> {
        Ok(CrossrefResolver::with_options(
            self.registry_url.as_str(),
            self.timeouts,
        )?)
    }
}

pub(crate) fn resolve_settings(cli: &Cli, file: Option<&FileConfig>) -> RuntimeSettings {
    let file = file.cloned().unwrap_or_default();

    let registry_url = cli
        .registry_url
        .clone()
        .or(file.registry_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let connect_secs = cli
        .connect_timeout
        .or(file.connect_timeout_secs)
        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
    let read_secs = cli
        .read_timeout
        .or(file.read_timeout_secs)
        .unwrap_or(DEFAULT_READ_TIMEOUT_SECS);

    RuntimeSettings {
        registry_url,
        style: file.style,
        timeouts: HttpTimeouts::from_secs(connect_secs, read_secs),
        concurrency: file
            .concurrency
            .map_or(DEFAULT_CONCURRENCY, usize::from),
        ask_to_validate: file.ask_to_validate.unwrap_or(true),
        quiet: cli.quiet,
    }
}

/// Log level used when `RUST_LOG` is unset.
///
/// Priority: quiet flag > verbose flag > config verbosity > `warn`.
pub(crate) fn resolve_default_log_level(cli: &Cli, file: Option<&FileConfig>) -> &'static str {
    if cli.quiet {
        return "error";
    }
    match cli.verbose {
        0 => file
            .and_then(|cfg| cfg.verbosity)
            .map_or(DEFAULT_LOG_LEVEL, |verbosity| verbosity.log_level()),
        1 => "debug",
        _ => "trace",
    }
}
