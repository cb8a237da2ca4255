//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Turn DOIs into formatted bibliographic citations.
///
/// doicite resolves DOIs against the Crossref registry and renders the
/// record in a citation style (AMA by default).
#[derive(Parser, Debug)]
#[command(name = "doicite")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress everything on stderr except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Registry base URL (default: http://data.crossref.org)
    #[arg(long, value_name = "URL", global = true)]
    pub registry_url: Option<String>,

    /// Registry connect timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// Registry read timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve DOIs and print one citation per line
    Cite(CiteArgs),

    /// Resolve a DOI and print its metadata as JSON
    Resolve(ResolveArgs),

    /// Render metadata JSON as a citation without network access
    Format(FormatArgs),

    /// Replace <doi>...</doi> tags in text with citations
    Expand(ExpandArgs),

    /// List available citation styles
    Styles,
}

#[derive(Args, Debug)]
pub struct CiteArgs {
    /// DOIs to cite (bare, doi:-prefixed, or doi.org URLs)
    #[arg(required = true, value_name = "DOI")]
    pub dois: Vec<String>,

    /// Citation style (unknown names fall back to the default)
    #[arg(short, long)]
    pub style: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// DOI to resolve
    #[arg(value_name = "DOI")]
    pub doi: String,
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Citation style (unknown names fall back to the default)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Metadata JSON file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Citation style (unknown names fall back to the default)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Maximum concurrent lookups (1-16)
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub concurrency: Option<u8>,

    /// Do not print the "please check" reminder after successful substitution
    #[arg(long)]
    pub no_check_notice: bool,

    /// Text file to expand (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}
