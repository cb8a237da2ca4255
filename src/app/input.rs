use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Reads the whole input from `path`, or from stdin when `path` is `None`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        debug!(path = %path.display(), "Reading input file");
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display()));
    }

    debug!("Reading input from stdin");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read input from stdin")?;
    Ok(buffer)
}
