//! CLI command handlers.

mod cite;
mod expand;
mod format;
mod resolve;
mod styles;

pub(crate) use cite::run_cite_command;
pub(crate) use expand::run_expand_command;
pub(crate) use format::run_format_command;
pub(crate) use resolve::run_resolve_command;
pub(crate) use styles::run_styles_command;
