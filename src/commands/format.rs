use anyhow::{Context, Result};
use doicite_core::{Metadata, builtin_styles};
use tracing::error;

use crate::ProcessExit;
use crate::app::config_runtime::RuntimeSettings;
use crate::app::input::read_input;
use crate::cli::FormatArgs;

/// Renders metadata JSON offline.
pub(crate) fn run_format_command(args: &FormatArgs, settings: &RuntimeSettings) -> Result<ProcessExit> {
    let raw = read_input(args.input.as_deref())?;
    let metadata: Metadata = serde_json::from_str(&raw).context("Input is not valid metadata JSON")?;

    let citation = builtin_styles().format(&metadata, settings.style_for(args.style.as_deref()));
    if citation.is_empty() {
        error!("Metadata has no authors, title, or journal to cite");
        return Ok(ProcessExit::Failure);
    }

    println!("{citation}");
    Ok(ProcessExit::Success)
}
