//! AbacatePay command-line client.
//!
//! Read-only access to an AbacatePay account plus local webhook signature
//! checks. Every command prints the decoded result as JSON.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `ABACATEPAY_API_KEY`, `ABACATEPAY_API_URL`, `ABACATEPAY_API_VERSION`,
//!   `ABACATEPAY_TIMEOUT_SECS` configure the client
//! - `RUST_LOG` controls log output (e.g. `RUST_LOG=abacatepay=debug`)

use std::path::PathBuf;

use abacatepay::{AbacatePay, ConfigOptions, SignatureVerifier};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "abacatepay")]
#[command(about = "AbacatePay API command-line client", version)]
struct CliArgs {
    /// API key (`Authorization: Bearer ...`)
    #[arg(long, env = "ABACATEPAY_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// Base URL of the API
    #[arg(long, env = "ABACATEPAY_API_URL", global = true)]
    api_url: Option<String>,
    /// API version, without the `v` prefix
    #[arg(long, env = "ABACATEPAY_API_VERSION", global = true)]
    api_version: Option<String>,
    /// Request timeout in seconds, 0 disables it
    #[arg(long, env = "ABACATEPAY_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the store and its balances
    Store,
    /// Show public MRR figures
    Mrr,
    /// Show the public merchant profile
    MerchantInfo,
    /// Show revenue over a date range
    Revenue {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
    },
    /// Customer operations
    #[command(subcommand)]
    Customers(ListCommand),
    /// Billing operations
    #[command(subcommand)]
    Billing(LookupCommand),
    /// PIX QR code charge operations
    #[command(subcommand)]
    Pix(PixCommand),
    /// Withdraw operations
    #[command(subcommand)]
    Withdraw(LookupCommand),
    /// Coupon operations
    #[command(subcommand)]
    Coupons(ListCommand),
    /// Check a webhook payload against its signature
    VerifySignature {
        /// File holding the raw request body
        #[arg(long)]
        payload: PathBuf,
        /// Value of the `X-Webhook-Signature` header
        #[arg(long)]
        signature: String,
        /// HMAC key, defaults to the AbacatePay public key
        #[arg(long, env = "ABACATEPAY_WEBHOOK_KEY", hide_env_values = true)]
        key: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ListCommand {
    List,
}

#[derive(Subcommand, Debug)]
enum LookupCommand {
    List,
    /// Look up by id (billing) or external id (withdraw)
    Get { id: String },
}

#[derive(Subcommand, Debug)]
enum PixCommand {
    /// Show the status of a charge
    Check { id: String },
    /// Mark a dev-mode charge as paid
    Simulate { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env variables
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    if let Command::VerifySignature {
        payload,
        signature,
        key,
    } = &args.command
    {
        let payload = std::fs::read(payload)?;
        let verifier = match key {
            Some(key) => SignatureVerifier::new(key),
            None => SignatureVerifier::abacatepay(),
        }
        .map_err(|err| format!("invalid webhook key: {err}"))?;
        let valid = verifier.verify(&payload, signature);
        print_json(&serde_json::json!({ "valid": valid }))?;
        if !valid {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut options = ConfigOptions::new();
    options.api_key = args.api_key;
    options.api_url = args.api_url;
    options.api_version = args.api_version;
    options.timeout_secs = args.timeout_secs;
    let config = options.resolve()?;
    tracing::debug!(?config, "Resolved configuration");
    let client = AbacatePay::new(config)?;

    match args.command {
        Command::Store => print_json(&client.store().get().await?)?,
        Command::Mrr => print_json(&client.mrr().get().await?)?,
        Command::MerchantInfo => print_json(&client.mrr().merchant_info().await?)?,
        Command::Revenue { start, end } => print_json(&client.mrr().revenue(start, end).await?)?,
        Command::Customers(ListCommand::List) => print_json(&client.customers().list().await?)?,
        Command::Billing(LookupCommand::List) => print_json(&client.billing().list().await?)?,
        Command::Billing(LookupCommand::Get { id }) => {
            print_json(&client.billing().get(&id).await?)?
        }
        Command::Pix(PixCommand::Check { id }) => print_json(&client.pix().check(&id).await?)?,
        Command::Pix(PixCommand::Simulate { id }) => {
            print_json(&client.pix().simulate_payment(&id, None).await?)?
        }
        Command::Withdraw(LookupCommand::List) => print_json(&client.withdraw().list().await?)?,
        Command::Withdraw(LookupCommand::Get { id }) => {
            print_json(&client.withdraw().get(&id).await?)?
        }
        Command::Coupons(ListCommand::List) => print_json(&client.coupons().list().await?)?,
        Command::VerifySignature { .. } => {}
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
