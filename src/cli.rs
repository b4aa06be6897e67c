//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use backlinks_core::{Filter, SortOrder};
use clap::Parser;

/// Default page size when `--limit` is not given.
pub const DEFAULT_LIMIT: u32 = 20;

/// Fetch backlinks for a domain from a links API.
///
/// Prints the records as a JSON array, or `{ "error": ... }` when the API
/// rejects the request.
#[derive(Parser, Debug)]
#[command(name = "backlinks")]
#[command(author, version, about)]
pub struct Args {
    /// Domain whose inbound links are listed
    pub domain: String,

    /// Page number (starts at 1)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Records per page
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Column the server sorts by (e.g. qty, date_from)
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort direction: asc or desc
    #[arg(short, long)]
    pub order: Option<SortOrder>,

    /// Filter forwarded to the server as NAME:KIND:VALUE (repeatable)
    #[arg(short, long = "filter", value_name = "NAME:KIND:VALUE", value_parser = parse_filter)]
    pub filters: Vec<Filter>,

    /// Links API base address, overriding environment and config file
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parses `NAME:KIND:VALUE`. Only the first two colons split; the value is
/// kept verbatim and may be empty or contain colons.
fn parse_filter(raw: &str) -> Result<Filter, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(name), Some(kind), Some(val)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected NAME:KIND:VALUE, got '{raw}'"));
    };
    if name.is_empty() || kind.is_empty() {
        return Err(format!("filter name and kind must not be empty in '{raw}'"));
    }
    Ok(Filter::new(name, val, kind))
}
