//! Command-line client for the Crosspay tenant API.
//!
//! Reads `CROSSPAY__*` configuration from the environment (or `.env`) and
//! runs one query per invocation, printing the JSON result to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crosspay_server::adapters::CrosspayHttpClient;
use crosspay_server::application::{
    GetActiveEntitlementHandler, GetActiveEntitlementQuery, GetActiveProductHandler,
    GetActiveProductQuery,
};
use crosspay_server::config::{AppConfig, ConfigError, ValidationError};
use crosspay_server::domain::webhook::{WebhookEnvelope, WebhookError, WebhookVerifier};
use crosspay_server::ports::{BillingApi, BillingApiError};

#[derive(Parser)]
#[command(name = "crosspay-server", version, about = "Crosspay tenant API client")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products configured for the tenant
    Products,
    /// List entitlements in an environment
    Entitlements {
        #[arg(default_value = "production")]
        environment: String,
    },
    /// Show a customer's active subscription
    Subscription { email: String },
    /// Show the product behind a customer's active subscription
    ActiveProduct { email: String },
    /// Show the entitlement a customer holds in an environment
    ActiveEntitlement {
        email: String,
        #[arg(default_value = "sandbox")]
        environment: String,
    },
    /// Show extended customer information
    Customer { email: String },
    /// List customers one page at a time
    Customers {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Verify a webhook delivery against the configured public key
    Verify {
        /// File holding the raw request body
        payload: PathBuf,
        /// Base64 signature header value
        #[arg(long)]
        signature: String,
        /// RFC 3339 timestamp header value
        #[arg(long)]
        timestamp: String,
    },
}

impl Commands {
    /// Whether the command talks to the tenant API and so needs a client key.
    fn calls_api(&self) -> bool {
        !matches!(self, Commands::Verify { .. })
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] BillingApiError),

    #[error("Webhook rejected: {0}")]
    Webhook(#[from] WebhookError),

    #[error("CROSSPAY__WEBHOOK__PUBLIC_KEY_PEM is not set")]
    MissingWebhookKey,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    init_tracing(&config.log_level, cli.log_json);
    if cli.command.calls_api() {
        config.validate()?;
    } else {
        config.validate_webhook()?;
    }

    tracing::debug!(base_url = config.client.api_base_url(), "Configuration loaded");

    let api: Arc<dyn BillingApi> = Arc::new(CrosspayHttpClient::new(config.client.clone()));

    match cli.command {
        Commands::Products => print(&api.list_products().await?),
        Commands::Entitlements { environment } => {
            print(&api.list_entitlements(&environment).await?)
        }
        Commands::Subscription { email } => print(&api.get_active_subscription(&email).await?),
        Commands::ActiveProduct { email } => {
            let handler = GetActiveProductHandler::new(api);
            let query = GetActiveProductQuery {
                customer_email: email,
            };
            print(&handler.handle(query).await?)
        }
        Commands::ActiveEntitlement { email, environment } => {
            let handler = GetActiveEntitlementHandler::new(api);
            let query = GetActiveEntitlementQuery {
                customer_email: email,
                environment,
            };
            print(&handler.handle(query).await?)
        }
        Commands::Customer { email } => print(&api.get_customer_info(&email).await?),
        Commands::Customers { limit, cursor } => {
            print(&api.list_customers(limit, cursor.as_deref()).await?)
        }
        Commands::Verify {
            payload,
            signature,
            timestamp,
        } => {
            let context = config
                .webhook
                .verification_context()
                .ok_or(CliError::MissingWebhookKey)?;
            let raw = std::fs::read(&payload).map_err(|source| CliError::Io {
                path: payload.clone(),
                source,
            })?;

            let envelope = WebhookEnvelope::new(raw, signature, timestamp);
            let event = WebhookVerifier::new(context).verify(&envelope)?;
            print(event.event())
        }
    }
}

fn init_tracing(filter: &str, json: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
