//! ADNET CLI
//!
//! Command-line interface for the ADNET decentralized advertising registry.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adnet_api::{ApiConfig, ApiServer};
use adnet_core::traits::{AdRegistry, PublisherRegistry};
use adnet_core::types::Principal;
use adnet_registry::FileLedger;

/// ADNET - Decentralized Advertising Network Registry
#[derive(Parser)]
#[command(name = "adnet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Caller principal attributed to the operation
    #[arg(long = "as", global = true, env = "ADNET_CALLER", value_name = "PRINCIPAL")]
    caller: Option<String>,

    /// Path to the ledger file
    #[arg(long, global = true, env = "ADNET_LEDGER_PATH", default_value = "adnet.ledger")]
    data: PathBuf,

    /// Print records as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ad campaign
    CreateAd {
        /// Reference to the ad content
        content_url: String,
        /// Comma-separated demographic tags (order is kept)
        #[arg(long, value_delimiter = ',')]
        demographics: Vec<String>,
        /// Campaign budget
        #[arg(long, default_value = "0")]
        budget: u64,
    },

    /// Update the status of a campaign you own
    AdStatus {
        /// Campaign id
        ad_id: u64,
        /// New status token (e.g. active, paused, completed)
        status: String,
    },

    /// Update the budget of a campaign you own
    AdBudget {
        /// Campaign id
        ad_id: u64,
        /// New budget (absolute, not a delta)
        budget: u64,
    },

    /// Show a campaign
    GetAd {
        /// Campaign id
        ad_id: u64,
    },

    /// Register a publisher site
    RegisterPublisher {
        /// Site URL or name
        website: String,
        /// Comma-separated ad space labels
        #[arg(long, value_delimiter = ',')]
        spaces: Vec<String>,
    },

    /// Replace the ad spaces of a publisher you own
    AdSpaces {
        /// Publisher id
        publisher_id: u64,
        /// Comma-separated ad space labels (full replacement)
        #[arg(value_delimiter = ',')]
        spaces: Vec<String>,
    },

    /// Credit earnings to a publisher (any caller)
    RecordEarnings {
        /// Publisher id
        publisher_id: u64,
        /// Amount to credit
        amount: u64,
    },

    /// Show a publisher
    GetPublisher {
        /// Publisher id
        publisher_id: u64,
    },

    /// Show registry statistics
    Stats,

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "adnet=debug,info"
    } else {
        "adnet=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let caller = cli.caller;
    let data = cli.data;

    match cli.command {
        Commands::CreateAd {
            content_url,
            demographics,
            budget,
        } => cmd_create_ad(&data, caller, content_url, demographics, budget).await,
        Commands::AdStatus { ad_id, status } => {
            cmd_ad_status(&data, caller, ad_id, &status).await
        }
        Commands::AdBudget { ad_id, budget } => {
            cmd_ad_budget(&data, caller, ad_id, budget).await
        }
        Commands::GetAd { ad_id } => cmd_get_ad(&data, ad_id, cli.json).await,
        Commands::RegisterPublisher { website, spaces } => {
            cmd_register_publisher(&data, caller, website, spaces).await
        }
        Commands::AdSpaces {
            publisher_id,
            spaces,
        } => cmd_ad_spaces(&data, caller, publisher_id, spaces).await,
        Commands::RecordEarnings {
            publisher_id,
            amount,
        } => cmd_record_earnings(&data, publisher_id, amount).await,
        Commands::GetPublisher { publisher_id } => {
            cmd_get_publisher(&data, publisher_id, cli.json).await
        }
        Commands::Stats => cmd_stats(&data, cli.json).await,
        Commands::Serve { port, bind } => cmd_serve(&data, port, &bind).await,
    }
}

/// Parses the caller principal required by owner-gated commands.
fn require_caller(caller: Option<String>) -> Result<Principal> {
    let s = caller.context("caller required: pass --as <principal> or set ADNET_CALLER")?;
    Principal::new(s).context("invalid caller principal")
}

async fn open_ledger(path: &PathBuf) -> Result<FileLedger> {
    FileLedger::new(path)
        .await
        .with_context(|| format!("failed to open ledger at {}", path.display()))
}

async fn cmd_create_ad(
    data: &PathBuf,
    caller: Option<String>,
    content_url: String,
    demographics: Vec<String>,
    budget: u64,
) -> Result<()> {
    let caller = require_caller(caller)?;
    let ledger = open_ledger(data).await?;

    let ad_id = ledger
        .create_ad(&caller, content_url, demographics, budget)
        .await?;
    ledger.flush().await?;

    println!("{} campaign #{}", "✅ Created".green().bold(), ad_id);
    println!("   {} {}", "Advertiser:".dimmed(), caller);
    println!("   {} {}", "Budget:".dimmed(), budget);
    Ok(())
}

async fn cmd_ad_status(
    data: &PathBuf,
    caller: Option<String>,
    ad_id: u64,
    status: &str,
) -> Result<()> {
    let caller = require_caller(caller)?;
    let ledger = open_ledger(data).await?;

    ledger.update_ad_status(&caller, ad_id, status).await?;
    ledger.flush().await?;

    println!(
        "{} campaign #{} status → {}",
        "✅ Updated".green().bold(),
        ad_id,
        status.yellow()
    );
    Ok(())
}

async fn cmd_ad_budget(
    data: &PathBuf,
    caller: Option<String>,
    ad_id: u64,
    budget: u64,
) -> Result<()> {
    let caller = require_caller(caller)?;
    let ledger = open_ledger(data).await?;

    ledger.update_ad_budget(&caller, ad_id, budget).await?;
    ledger.flush().await?;

    println!(
        "{} campaign #{} budget → {}",
        "✅ Updated".green().bold(),
        ad_id,
        budget
    );
    Ok(())
}

async fn cmd_get_ad(data: &PathBuf, ad_id: u64, json: bool) -> Result<()> {
    let ledger = open_ledger(data).await?;
    let ad = ledger.get_ad(ad_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ad)?);
        return Ok(());
    }

    println!("{} #{}", "📣 Campaign".cyan().bold(), ad.id);
    println!("   {} {}", "Advertiser:".dimmed(), ad.advertiser);
    println!("   {} {}", "Content:".dimmed(), ad.content_url);
    println!(
        "   {} {}",
        "Demographics:".dimmed(),
        ad.target_demographics.join(", ")
    );
    println!("   {} {}", "Budget:".dimmed(), ad.budget);
    println!("   {} {}", "Status:".dimmed(), ad.status.yellow());
    Ok(())
}

async fn cmd_register_publisher(
    data: &PathBuf,
    caller: Option<String>,
    website: String,
    spaces: Vec<String>,
) -> Result<()> {
    let caller = require_caller(caller)?;
    let ledger = open_ledger(data).await?;

    let publisher_id = ledger.register_publisher(&caller, website, spaces).await?;
    ledger.flush().await?;

    println!("{} publisher #{}", "✅ Registered".green().bold(), publisher_id);
    println!("   {} {}", "Owner:".dimmed(), caller);
    Ok(())
}

async fn cmd_ad_spaces(
    data: &PathBuf,
    caller: Option<String>,
    publisher_id: u64,
    spaces: Vec<String>,
) -> Result<()> {
    let caller = require_caller(caller)?;
    let ledger = open_ledger(data).await?;

    ledger
        .update_ad_spaces(&caller, publisher_id, spaces)
        .await?;
    ledger.flush().await?;

    println!(
        "{} ad spaces for publisher #{}",
        "✅ Replaced".green().bold(),
        publisher_id
    );
    Ok(())
}

async fn cmd_record_earnings(data: &PathBuf, publisher_id: u64, amount: u64) -> Result<()> {
    let ledger = open_ledger(data).await?;

    ledger.record_earnings(publisher_id, amount).await?;
    ledger.flush().await?;

    let publisher = ledger.get_publisher(publisher_id).await?;
    println!(
        "{} {} to publisher #{} (total: {})",
        "💰 Credited".green().bold(),
        amount,
        publisher_id,
        publisher.earnings
    );
    Ok(())
}

async fn cmd_get_publisher(data: &PathBuf, publisher_id: u64, json: bool) -> Result<()> {
    let ledger = open_ledger(data).await?;
    let publisher = ledger.get_publisher(publisher_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&publisher)?);
        return Ok(());
    }

    println!("{} #{}", "📰 Publisher".cyan().bold(), publisher.id);
    println!("   {} {}", "Owner:".dimmed(), publisher.owner);
    println!("   {} {}", "Website:".dimmed(), publisher.website);
    println!(
        "   {} {}",
        "Ad spaces:".dimmed(),
        publisher.ad_spaces.join(", ")
    );
    println!("   {} {}", "Earnings:".dimmed(), publisher.earnings);
    Ok(())
}

async fn cmd_stats(data: &PathBuf, json: bool) -> Result<()> {
    let ledger = open_ledger(data).await?;
    let ads = ledger.ad_stats();
    let publishers = ledger.publisher_stats();

    if json {
        let stats = serde_json::json!({ "ads": ads, "publishers": publishers });
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "📊 Registry statistics".cyan().bold());
    println!("   {} {}", "Campaigns:".dimmed(), ads.total_count);
    println!("   {} {}", "Committed budget:".dimmed(), ads.total_budget);
    println!("   {} {}", "Publishers:".dimmed(), publishers.total_count);
    println!(
        "   {} {}",
        "Credited earnings:".dimmed(),
        publishers.total_earnings
    );
    Ok(())
}

async fn cmd_serve(data: &PathBuf, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting ADNET API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig {
        ledger_path: Some(data.clone()),
    };
    let server = ApiServer::new(config).await?;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}
