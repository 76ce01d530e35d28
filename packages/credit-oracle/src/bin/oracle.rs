//! Credit oracle callback binary.

use clap::Parser;
use credit_oracle::{run, to_hex, FetchOptions, DEFAULT_BASE_URL};
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch a credit score and print it as a 0x-prefixed uint256.
#[derive(Parser, Debug)]
#[command(name = "credit-oracle", version)]
struct Cli {
    /// Score-array identifier (args[0]).
    credit_score_array: String,

    /// Borrower address (args[1]).
    borrower_address: String,

    /// Score endpoint base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    timeout_ms: u64,

    /// JSON pointer to the score inside the response, e.g. `/score`.
    #[arg(long)]
    json_pointer: Option<String>,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries only the encoded result.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = FetchOptions {
        base_url: cli.base_url,
        timeout: Duration::from_millis(cli.timeout_ms),
        json_pointer: cli.json_pointer,
    };

    match run(&[cli.credit_score_array, cli.borrower_address], &options).await {
        Ok(encoded) => println!("{}", to_hex(&encoded)),
        Err(e) => {
            error!(error = %e, "Credit oracle callback failed");
            std::process::exit(1);
        }
    }
}
