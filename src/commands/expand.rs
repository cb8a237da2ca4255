use anyhow::Result;
use doicite_core::{Notice, SubstitutionOptions, builtin_styles, substitute_doi_tags};

use crate::ProcessExit;
use crate::app::config_runtime::RuntimeSettings;
use crate::app::input::read_input;
use crate::cli::ExpandArgs;

/// Rewrites `<doi>` tags and prints the text unchanged otherwise.
///
/// The aggregate notice goes to stderr so stdout stays pipeable. The
/// "please check" reminder is suppressed by `-q`; the unresolved notice is not.
pub(crate) async fn run_expand_command(
    args: &ExpandArgs,
    settings: &RuntimeSettings,
) -> Result<ProcessExit> {
    let text = read_input(args.input.as_deref())?;
    let resolver = settings.build_resolver()?;
    let options = SubstitutionOptions {
        style: settings.style_for(args.style.as_deref()).map(str::to_string),
        concurrency: args.concurrency.map_or(settings.concurrency, usize::from),
    };

    let substitution = substitute_doi_tags(&text, &resolver, builtin_styles(), &options).await;
    print!("{}", substitution.text);

    let ask_to_validate = settings.ask_to_validate && !args.no_check_notice;
    match substitution.notice(ask_to_validate) {
        Some(notice @ Notice::Unresolved) => eprintln!("{notice}"),
        Some(notice @ Notice::PleaseCheck) if !settings.quiet => eprintln!("{notice}"),
        _ => {}
    }

    Ok(ProcessExit::from_failures(substitution.failures.len()))
}
