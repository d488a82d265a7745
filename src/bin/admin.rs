//! CLI administration tool for snaplink.
//!
//! Provides database maintenance and link inspection without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # Show a mapping and its click count
//! cargo run --bin admin -- link show promo1
//!
//! # Create a mapping (prompts for the URL when omitted)
//! cargo run --bin admin -- link create https://example.com --code promo1
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SHORTENER_DOMAIN` (optional): base domain used when printing short URLs

use snaplink::application::services::{LinkService, ShortenOutcome};
use snaplink::domain::repositories::MappingRepository;
use snaplink::infrastructure::persistence::PgMappingRepository;
use snaplink::utils::code_generator::RandomCodeGenerator;
use snaplink::utils::short_url::{build_short_url, normalize_base_domain};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
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
    /// Database utilities
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect and create short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count mappings
    Check,

    /// Apply pending migrations
    Migrate,
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show a mapping by code
    Show {
        /// Short code
        code: String,
    },

    /// Create a mapping
    Create {
        /// Long URL (prompted if omitted)
        url: Option<String>,

        /// Custom alias (at least 4 characters)
        #[arg(short, long)]
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Link { action } => handle_link_action(action, &pool).await?,
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());

            let mappings: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE deleted_at IS NULL")
                    .fetch_one(pool)
                    .await
                    .context("Failed to count mappings (run `admin db migrate`?)")?;

            println!(
                "  Mappings: {}",
                mappings.to_string().bright_green().bold()
            );
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "Migrations up to date".green().bold());
        }
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));

    match action {
        LinkAction::Show { code } => show_link(repo, &code).await,
        LinkAction::Create { url, code } => create_link(repo, url, code).await,
    }
}

async fn show_link(repo: Arc<PgMappingRepository>, code: &str) -> Result<()> {
    let mapping = match repo.find_by_code(code).await {
        Ok(mapping) => mapping,
        Err(e) if e.is_not_found() => {
            println!("{} {}", "No mapping for code".yellow(), code.bright_white());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to look up mapping"),
    };

    println!("{}", "Mapping".bright_blue().bold());
    println!();
    println!("  Code:     {}", mapping.code.bright_white().bold());
    println!("  Long URL: {}", mapping.long_url);
    println!(
        "  Clicks:   {}",
        mapping.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:  {}",
        mapping.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    Ok(())
}

async fn create_link(
    repo: Arc<PgMappingRepository>,
    url: Option<String>,
    code: Option<String>,
) -> Result<()> {
    let long_url = match url {
        Some(url) => url,
        None => Input::new()
            .with_prompt("Long URL")
            .interact_text()
            .context("Failed to read URL")?,
    };

    let outcome = shorten_link(repo, &long_url, code.as_deref()).await?;

    if outcome.created {
        println!("{}", "Short link created".green().bold());
    } else {
        println!("{}", "Existing short link reused".yellow().bold());
    }

    println!();
    println!("  Code:     {}", outcome.mapping.code.bright_white().bold());
    println!("  Long URL: {}", outcome.mapping.long_url);

    if let Ok(domain) = std::env::var("SHORTENER_DOMAIN")
        && !domain.trim().is_empty()
    {
        let base = normalize_base_domain(domain.trim());
        println!(
            "  Short URL: {}",
            build_short_url(&base, &outcome.mapping.code).bright_cyan()
        );
    }
    println!();

    Ok(())
}

/// Runs the same allocation path as `POST /api/shorten`.
async fn shorten_link<R: MappingRepository + ?Sized>(
    repo: Arc<R>,
    long_url: &str,
    code: Option<&str>,
) -> Result<ShortenOutcome> {
    LinkService::new(repo, Arc::new(RandomCodeGenerator::default()), 3)
        .shorten(long_url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create mapping: {}", e))
}
