use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::app::{config_runtime, terminal};
use crate::cli::{Cli, Command};
use crate::{ProcessExit, app_config, commands};

pub(crate) async fn run_doicite() -> Result<ProcessExit> {
    // Parse before tracing so --help and --version print without logs.
    let cli = Cli::parse();

    let loaded = app_config::load_default_file_config()?;
    let file_config = loaded.config.as_ref();

    terminal::init_tracing(config_runtime::resolve_default_log_level(&cli, file_config));
    debug!(?cli, config_path = ?loaded.path, config_loaded = file_config.is_some(), "CLI arguments parsed");

    let settings = config_runtime::resolve_settings(&cli, file_config);

    match &cli.command {
        Command::Cite(args) => commands::run_cite_command(args, &settings).await,
        Command::Resolve(args) => commands::run_resolve_command(args, &settings).await,
        Command::Format(args) => commands::run_format_command(args, &settings),
        Command::Expand(args) => commands::run_expand_command(args, &settings).await,
        Command::Styles => Ok(commands::run_styles_command()),
    }
}
