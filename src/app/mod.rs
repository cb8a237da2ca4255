//! Binary runtime: settings resolution, terminal setup, and command dispatch.

pub(crate) mod config_runtime;
pub(crate) mod input;
pub(crate) mod runtime;
pub(crate) mod terminal;
