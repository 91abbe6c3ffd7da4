//! CLI administration tool for shortli.
//!
//! Provides commands for viewing statistics, shortening URLs, purging stale
//! links and performing database checks without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Shorten a URL directly against the database
//! cargo run --bin admin -- shorten example.com/a
//!
//! # Delete links older than 90 days
//! cargo run --bin admin -- cleanup --older-than-days 90
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `BASE_URL` - used to print short URLs
//! - `CODE_MAX_ATTEMPTS` - allocation budget for `shorten`

use shortli::application::services::{CodeAllocator, LinkService};
use shortli::config::{Config, mask_connection_string};
use shortli::domain::cleanup_worker::purge_stale_links;
use shortli::domain::repositories::LinkRepository;
use shortli::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortli.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Shorten a URL
    Shorten {
        /// URL to shorten (scheme optional)
        url: String,
    },

    /// Delete links older than the given age
    Cleanup {
        /// Age threshold in days
        #[arg(long)]
        older_than_days: u32,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&config.database_url)
            )
        })?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Shorten { url } => handle_shorten(&config, &pool, &url).await?,
        Commands::Cleanup {
            older_than_days,
            yes,
        } => handle_cleanup(&pool, older_than_days, yes).await?,
    }

    Ok(())
}

fn repository(pool: &PgPool) -> Arc<dyn LinkRepository> {
    Arc::new(PgLinkRepository::new(Arc::new(pool.clone())))
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links, clicks, qr_clicks): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(click_count), 0)::BIGINT, COALESCE(SUM(qr_click_count), 0)::BIGINT FROM url_info",
    )
    .fetch_one(pool)
    .await?;

    println!("  Links:         {}", links.to_string().bright_green().bold());
    println!("  Clicks:        {}", clicks.to_string().bright_green().bold());
    println!("  QR clicks:     {}", qr_clicks.to_string().bright_green().bold());
    println!(
        "  Total clicks:  {}",
        (clicks + qr_clicks).to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let size: String =
                sqlx::query_scalar("SELECT pg_size_pretty(pg_total_relation_size('url_info'))")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  url_info:   {}", size.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Normalizes and shortens a URL through the same path as `POST /api/shorten`.
async fn handle_shorten(config: &Config, pool: &PgPool, url: &str) -> Result<()> {
    let repo = repository(pool);
    let allocator = CodeAllocator::new(repo.clone()).with_max_attempts(config.code_max_attempts);
    let service = LinkService::new(repo, allocator);

    let allocation = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    let short_url = service.short_url(&config.base_url, allocation.short_code());

    if allocation.is_new {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "ℹ️  URL was already shortened".yellow());
    }
    println!();
    println!("  Original:  {}", allocation.link.original_url.cyan());
    println!("  Code:      {}", allocation.link.short_code.bright_yellow());
    println!("  Short URL: {}", short_url.bright_white().bold());
    println!();

    Ok(())
}

/// Deletes links created more than `days` days ago, after confirmation.
async fn handle_cleanup(pool: &PgPool, days: u32, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Cleanup".bright_blue().bold());
    println!();

    if days == 0 {
        anyhow::bail!("--older-than-days must be greater than 0");
    }

    println!(
        "  Links created more than {} days ago will be {}.",
        days.to_string().bright_white().bold(),
        "permanently deleted".red()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Proceed?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let repo = repository(pool);
    let deleted = purge_stale_links(repo.as_ref(), chrono::Duration::days(i64::from(days)))
        .await
        .map_err(|e| anyhow::anyhow!("Cleanup failed: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Deleted links:".green().bold(),
        deleted.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}
