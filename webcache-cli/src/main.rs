//! webcache CLI
//!
//! Fetch pages through the counting cache and inspect what it has stored.

mod backend;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webcache_cache::PageService;
use webcache_core::keys::{cached_key, count_key};
use webcache_core::traits::KeyValueStore;
use webcache_fetch::HttpFetcher;

use crate::backend::Backend;
use crate::config::AppConfig;

/// webcache - fetch web pages through a short-lived shared cache
#[derive(Parser)]
#[command(name = "webcache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Redis connection URL
    #[arg(long, global = true, env = "REDIS_URL")]
    redis_url: Option<String>,

    /// Use a process-local store instead of Redis
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page through the cache and print it
    Get {
        /// Page URL
        url: String,
        /// Fetch the page this many times (useful with --memory)
        #[arg(short, long, default_value = "1")]
        repeat: u32,
    },

    /// Print how many times a URL has been requested
    Count {
        /// Page URL
        url: String,
    },

    /// Show the stored counter and cache entry for a URL
    Inspect {
        /// Page URL
        url: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = AppConfig::from_env()?;
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "webcache=debug,info"
    } else {
        "webcache=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(url) = cli.redis_url {
        config.store.redis_url = url;
    }

    let store = Arc::new(
        Backend::open(cli.memory, &config.store)
            .await
            .context("Failed to open store")?,
    );
    debug!(backend = store.name(), "Store ready");

    match cli.command {
        Commands::Get { url, repeat } => cmd_get(store, &config, &url, repeat).await,
        Commands::Count { url } => cmd_count(store, &config, &url).await,
        Commands::Inspect { url, json } => cmd_inspect(&store, &url, json).await,
    }
}

fn build_service(store: Arc<Backend>, config: &AppConfig) -> Result<PageService<HttpFetcher, Arc<Backend>>> {
    let fetcher = HttpFetcher::with_config(config.fetch.clone()).context("Failed to build HTTP client")?;
    Ok(PageService::with_config(store, fetcher, config.cache.clone()))
}

/// Fetch a page through the cache
async fn cmd_get(store: Arc<Backend>, config: &AppConfig, url: &str, repeat: u32) -> Result<()> {
    let service = build_service(store, config)?;

    for _ in 0..repeat.max(1) {
        let page = service
            .get_page(url)
            .await
            .with_context(|| format!("Failed to get {}", url))?;
        println!("{}", page);
    }

    let count = service.access_count(url).await?;
    eprintln!("{} {} (requested {} time(s))", "✅ Done:".green().bold(), url, count);

    Ok(())
}

/// Print the access count
async fn cmd_count(store: Arc<Backend>, config: &AppConfig, url: &str) -> Result<()> {
    let service = build_service(store, config)?;
    let count = service.access_count(url).await?;
    println!("{}", count);
    Ok(())
}

/// Inspect stored state for a URL
async fn cmd_inspect(store: &Backend, url: &str, json: bool) -> Result<()> {
    let counter_key = count_key(url);
    let page_key = cached_key(url);

    let count = store
        .get(&counter_key)
        .await?
        .map(|raw| String::from_utf8_lossy(&raw).into_owned());
    let cached = store.get(&page_key).await?;
    let ttl = store.ttl(&page_key).await?;

    if json {
        let report = serde_json::json!({
            "url": url,
            "backend": store.name(),
            "count_key": counter_key,
            "count": count,
            "cached_key": page_key,
            "cached_bytes": cached.as_ref().map(Vec::len),
            "ttl_ms": ttl.map(|d| d.as_millis() as u64),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "🔍 Inspecting:".cyan().bold(), url);
    println!("   {} {}", "Backend:".dimmed(), store.name());
    println!(
        "   {} {} = {}",
        "Counter:".dimmed(),
        counter_key,
        count.as_deref().unwrap_or("(none)")
    );

    match cached {
        Some(page) => {
            let ttl = ttl
                .map(|d| format!("{:.1}s", d.as_secs_f64()))
                .unwrap_or_else(|| "no expiry".into());
            println!("   {} {} = {} bytes, {} left", "Cached:".dimmed(), page_key, page.len(), ttl);
        }
        None => println!("   {} {} {}", "Cached:".dimmed(), page_key, "(miss)".yellow()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get_with_repeat() {
        let cli = Cli::try_parse_from(["webcache", "--memory", "get", "http://a.test", "-r", "3"]).unwrap();
        assert!(cli.memory);
        assert!(matches!(cli.command, Commands::Get { ref url, repeat: 3 } if url == "http://a.test"));
    }

    #[test]
    fn test_parse_inspect_json() {
        let cli = Cli::try_parse_from(["webcache", "inspect", "http://a.test", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect { json: true, .. }));
    }
}
