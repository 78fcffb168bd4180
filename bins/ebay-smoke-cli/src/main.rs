//! eBay API Smoke Test CLI
//!
//! Commands:
//! - `calls`: List the registered calls of a traditional API
//! - `call`: Perform one traditional API call and print the raw response
//! - `rate-limits`: Query the Developer Analytics API
//!
//! # Usage
//! ```bash
//! # Configuration comes from the environment
//! EBAY_APP_ID=... EBAY_CERT_ID=... EBAY_DEV_ID=... EBAY_SITE_ID=0 EBAY_SANDBOX=true
//!
//! ebay_smoke calls --api finding
//! ebay_smoke call --api trading --name GeteBayOfficialTime
//! ebay_smoke call --api shopping --name GetSingleItem --fields '{"ItemID": "110"}'
//! ebay_smoke call --api trading --name GetUser --use-iaf --header X-EBAY-API-SITEID=77
//! ebay_smoke rate-limits --api-name TradingAPI
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use ebay_adapter::auth::Auth;
use ebay_adapter::restful::Analytics;
use ebay_adapter::traditional::{Traditional, TraditionalService};
use ebay_adapter::transport::{ReqwestTransport, Transport};
use ebay_adapter::{CallOptions, EbayConfig, Fields};

#[derive(Parser)]
#[command(name = "ebay_smoke")]
#[command(about = "eBay API smoke test CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum ApiKind {
    Trading,
    Shopping,
    Finding,
    ClientAlerts,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered calls of a traditional API
    Calls {
        #[arg(long, value_enum)]
        api: ApiKind,
    },

    /// Perform one call
    Call {
        #[arg(long, value_enum)]
        api: ApiKind,

        /// Call name (e.g. GeteBayOfficialTime)
        #[arg(long)]
        name: String,

        /// Call fields as a JSON object
        #[arg(long, default_value = "{}")]
        fields: String,

        /// Prefer the OAuth access token over the Auth'n'Auth token
        #[arg(long, default_value = "false")]
        use_iaf: bool,

        /// Header override NAME=VALUE. Can specify multiple times.
        #[arg(long)]
        header: Vec<String>,
    },

    /// Query application rate limits
    RateLimits {
        #[arg(long)]
        api_context: Option<String>,

        #[arg(long)]
        api_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();

    match cli.command {
        Commands::Calls { api } => run_list_calls(api),
        Commands::Call { api, name, fields, use_iaf, header } => {
            run_call(api, name, fields, use_iaf, header).await
        }
        Commands::RateLimits { api_context, api_name } => run_rate_limits(api_context, api_name).await,
    }
}

fn load_config() -> Result<EbayConfig> {
    let config = EbayConfig::from_env().context("Failed to load eBay configuration")?;
    info!("Config: {:?}", config);
    Ok(config)
}

fn build_service(gateway: &Traditional, api: ApiKind) -> Result<TraditionalService> {
    let service = match api {
        ApiKind::Trading => gateway.create_trading_api()?,
        ApiKind::Shopping => gateway.create_shopping_api()?,
        ApiKind::Finding => gateway.create_finding_api()?,
        ApiKind::ClientAlerts => gateway.create_client_alerts_api()?,
    };
    Ok(service)
}

fn run_list_calls(api: ApiKind) -> Result<()> {
    let gateway = Traditional::from_config(load_config()?)?;
    let service = build_service(&gateway, api)?;

    info!("=== {} API: {} calls ===", service.api_name(), service.calls().len());
    for call in service.calls() {
        println!("{}", call);
    }
    Ok(())
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid header '{}', expected NAME=VALUE", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

async fn run_call(
    api: ApiKind,
    name: String,
    fields: String,
    use_iaf: bool,
    headers: Vec<String>,
) -> Result<()> {
    let fields: Fields = match serde_json::from_str::<Value>(&fields).context("Invalid --fields JSON")? {
        Value::Object(map) => map,
        other => anyhow::bail!("--fields must be a JSON object, got {}", other),
    };

    let mut options = CallOptions { use_iaf, ..CallOptions::default() };
    for raw in &headers {
        let (name, value) = parse_header(raw)?;
        options = options.with_header(name, value);
    }

    let gateway = Traditional::from_config(load_config()?)?;
    let service = build_service(&gateway, api)?;

    info!("=== {} {} ===", service.api_name(), name);
    match service.call(&name, fields, options).await {
        Ok(response) => {
            info!("HTTP {}", response.status);
            println!("{}", response.text());
            Ok(())
        }
        Err(e) => {
            error!("Call failed: {}", e);
            Err(e.into())
        }
    }
}

async fn run_rate_limits(api_context: Option<String>, api_name: Option<String>) -> Result<()> {
    let config = load_config()?;
    let auth = Arc::new(Auth::from_config(&config)?);
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new()?);
    let analytics = Analytics::new(&config, auth, transport);

    let limits = analytics.get_rate_limits(api_context.as_deref(), api_name.as_deref()).await?;
    println!("{}", serde_json::to_string_pretty(&limits)?);
    Ok(())
}
