//! Percolate CLI - query the Percolate API from the command line

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use percolate::{
    ClientConfig, ConfigError, ListOptions, OrderBy, PercolateClient, PercolateError,
};
use serde_json::Value;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "percolate")]
#[command(about = "Query the Percolate API and print the JSON response", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// API key [default: $PERCOLATE_API_KEY]
    #[arg(long, global = true, env = "PERCOLATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API base URL [default: $PERCOLATE_BASE_URL or http://percolate.com/api/v3/]
    #[arg(long, global = true, env = "PERCOLATE_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in milliseconds [default: $PERCOLATE_TIMEOUT_MS or 10000]
    #[arg(long, global = true, env = "PERCOLATE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a user by ID
    User {
        #[arg(value_name = "USER_ID")]
        id: u64,
    },

    /// Get a single post by ID
    Post {
        #[arg(value_name = "POST_ID")]
        id: u64,
    },

    /// List a user's posts
    UserPosts {
        #[arg(value_name = "USER_ID")]
        id: u64,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List the users in a group (all of them unless --limit is set)
    GroupUsers {
        #[arg(value_name = "GROUP_ID")]
        id: u64,

        /// Print only the `data` array
        #[arg(long)]
        data_only: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List posts made by users in a group
    GroupPosts {
        #[arg(value_name = "GROUP_ID")]
        id: u64,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List posts published under a license
    LicensePosts {
        #[arg(value_name = "LICENSE_ID")]
        id: u64,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Page size
    #[arg(long)]
    limit: Option<u32>,

    /// Number of records to skip
    #[arg(long)]
    offset: Option<u32>,

    /// Sort order: points, release_at (prefix with '-' for descending)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_order_by)]
    order_by: Option<OrderBy>,

    /// Extra API option passed through verbatim (repeatable: --param tag=rust)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    params: Vec<(String, String)>,
}

impl ListArgs {
    fn into_options(self) -> ListOptions {
        let mut options = ListOptions::new();
        for (key, value) in self.params {
            options = options.param(key, value);
        }
        if let Some(limit) = self.limit {
            options = options.limit(limit);
        }
        if let Some(offset) = self.offset {
            options = options.offset(offset);
        }
        if let Some(order) = self.order_by {
            options = options.order_by(order);
        }
        options
    }
}

fn parse_order_by(raw: &str) -> Result<OrderBy, String> {
    raw.parse().map_err(|e: ConfigError| e.to_string())
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,percolate=info".to_string(),
            2 => "info,percolate=debug".to_string(),
            _ => "debug,percolate=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn build_client(cli: &Cli) -> Result<PercolateClient, PercolateError> {
    let mut builder = ClientConfig::builder(cli.api_key.clone().unwrap_or_default());
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(ms) = cli.timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    PercolateClient::with_config(builder.build()?)
}

async fn run(client: &PercolateClient, command: Commands) -> Result<Value, PercolateError> {
    match command {
        Commands::User { id } => client.user(id).await,
        Commands::Post { id } => client.post(id).await,
        Commands::UserPosts { id, list } => client.user_posts(id, list.into_options()).await,
        Commands::GroupUsers {
            id,
            data_only,
            list,
        } => {
            if data_only {
                client
                    .group_user_list(id, list.into_options())
                    .await
                    .map(Value::Array)
            } else {
                client.group_users(id, list.into_options()).await
            }
        }
        Commands::GroupPosts { id, list } => client.group_posts(id, list.into_options()).await,
        Commands::LicensePosts { id, list } => {
            client.license_posts(id, list.into_options()).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json_logs);

    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(config = ?client.config(), "Percolate client ready");

    let compact = cli.compact;
    match run(&client, cli.command).await {
        Ok(value) => {
            let rendered = if compact {
                serde_json::to_string(&value)
            } else {
                serde_json::to_string_pretty(&value)
            };
            match rendered {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: failed to render response: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
