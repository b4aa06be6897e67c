//! CLI entry point for the backlinks tool.

use std::process::ExitCode;

use anyhow::{Context, Result};
use backlinks_core::{
    ApiClient, ClientOptions, LinksQuery, LinksService, RetrievalResult, resolve_base_url,
};
use clap::Parser;
use tracing::{debug, info, warn};

mod app_config;
mod cli;

use app_config::{FileConfig, VerbositySetting};
use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let file_config = app_config::load_config(args.config.as_deref())?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config file > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(default_log_level(&args, file_config.as_ref()))
    });
    // stdout carries the JSON result, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let env_base_url = app_config::runtime_base_url_from_env();
    let runtime_base_url = app_config::runtime_base_url(
        args.api_base_url.as_deref(),
        env_base_url.as_deref(),
        file_config.as_ref(),
    );
    let endpoint = resolve_base_url(runtime_base_url.as_deref());

    let options = ClientOptions {
        timeout: file_config.as_ref().and_then(FileConfig::request_timeout),
    };
    let client = ApiClient::with_options(&endpoint.base_url, options)
        .context("Failed to initialise links API client")?;
    let service = LinksService::new(client);

    let query = build_query(&args)?;
    let result = service
        .fetch_links(&query)
        .await
        .with_context(|| format!("Failed to fetch backlinks for {}", args.domain))?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    match &result {
        RetrievalResult::Success(records) => {
            info!(count = records.len(), page = args.page, "Backlinks fetched");
            Ok(ExitCode::SUCCESS)
        }
        RetrievalResult::Failure(failure) => {
            warn!(kind = failure.kind(), "Backlinks request rejected");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn default_log_level(args: &Args, file_config: Option<&FileConfig>) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => file_config
            .and_then(|cfg| cfg.verbosity)
            .map_or("info", VerbositySetting::log_level),
        1 => "debug",
        _ => "trace",
    }
}

fn build_query(args: &Args) -> Result<LinksQuery> {
    let mut query = LinksQuery::new(args.domain.clone(), args.page, args.limit)?;
    if let Some(sort) = &args.sort {
        query = query.with_sort(sort.clone());
    }
    if let Some(order) = args.order {
        query = query.with_order(order);
    }
    if !args.filters.is_empty() {
        query = query.with_filters(args.filters.clone());
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use backlinks_core::{Filter, SortOrder};
    use serde_json::json;

    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_build_query_minimal_body() {
        let query = build_query(&parse(&["backlinks", "example.com"])).unwrap();
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "domain": "example.com", "page": 1, "limit": 20 })
        );
    }

    #[test]
    fn test_build_query_with_sort_order_and_filters() {
        let query = build_query(&parse(&[
            "backlinks",
            "example.com",
            "-s",
            "qty",
            "-o",
            "desc",
            "-f",
            "no_follow:eq:1",
        ]))
        .unwrap();
        assert_eq!(query.sort(), Some("qty"));
        assert_eq!(query.order(), Some(SortOrder::Descending));
        assert_eq!(query.filters(), Some(&[Filter::new("no_follow", "1", "eq")][..]));
    }

    #[test]
    fn test_default_log_level_priority() {
        let verbose_config = FileConfig {
            verbosity: Some(VerbositySetting::Verbose),
            ..FileConfig::default()
        };

        assert_eq!(default_log_level(&parse(&["backlinks", "a.com"]), None), "info");
        assert_eq!(
            default_log_level(&parse(&["backlinks", "a.com"]), Some(&verbose_config)),
            "debug"
        );
        assert_eq!(
            default_log_level(&parse(&["backlinks", "a.com", "-vv"]), Some(&verbose_config)),
            "trace"
        );
        assert_eq!(
            default_log_level(&parse(&["backlinks", "a.com", "-q", "-v"]), Some(&verbose_config)),
            "error"
        );
    }
}
