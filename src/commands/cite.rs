use anyhow::Result;
use doicite_core::{builtin_styles, cite};
use tracing::{error, info};

use crate::ProcessExit;
use crate::app::config_runtime::RuntimeSettings;
use crate::cli::CiteArgs;

/// Prints one citation per resolvable DOI; failures are logged and counted.
pub(crate) async fn run_cite_command(
    args: &CiteArgs,
    settings: &RuntimeSettings,
) -> Result<ProcessExit> {
    let resolver = settings.build_resolver()?;
    let style = settings.style_for(args.style.as_deref());

    let mut failed = 0;
    for doi in &args.dois {
        match cite(&resolver, builtin_styles(), doi, style).await {
            Ok(citation) => println!("{citation}"),
            Err(err) => {
                failed += 1;
                error!(identifier = %doi, error = %err, "{}", err.message());
            }
        }
    }

    info!(
        cited = args.dois.len() - failed,
        failed, "Citation run complete"
    );
    Ok(ProcessExit::from_failures(failed))
}
