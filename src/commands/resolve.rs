use anyhow::{Context, Result};
use doicite_core::MetadataResolver;
use tracing::error;

use crate::ProcessExit;
use crate::app::config_runtime::RuntimeSettings;
use crate::cli::ResolveArgs;

pub(crate) async fn run_resolve_command(
    args: &ResolveArgs,
    settings: &RuntimeSettings,
) -> Result<ProcessExit> {
    let resolver = settings.build_resolver()?;

    match resolver.resolve(&args.doi).await {
        Ok(metadata) => {
            let json = serde_json::to_string_pretty(&metadata)
                .context("Failed to serialize metadata")?;
            println!("{json}");
            Ok(ProcessExit::Success)
        }
        Err(err) => {
            error!(identifier = %args.doi, code = err.code(), error = %err, "{}", err.message());
            Ok(ProcessExit::Failure)
        }
    }
}
