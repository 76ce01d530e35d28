//! # Credit Oracle
//!
//! Callback for an off-chain compute oracle: looks up a precomputed credit
//! score on the Stormbit API and hands it back as a 32-byte `uint256`.
//!
//! ```bash
//! cargo run --bin credit-oracle -- <creditScoreArray> <borrowerAddress>
//! ```

pub mod encode;
mod error;
pub mod fetch;
pub mod request;

pub use encode::{decode_score, encode_uint256, to_hex};
pub use error::OracleError;
pub use fetch::{FetchOptions, ScoreFetcher};
pub use request::{ScoreQuery, DEFAULT_BASE_URL};

/// Entry point for the oracle runtime: positional args in, encoded score out.
pub async fn run<S: AsRef<str>>(
    args: &[S],
    options: &FetchOptions,
) -> Result<[u8; 32], OracleError> {
    let query = ScoreQuery::from_args(args)?;
    let score = ScoreFetcher::new(options.clone())?.fetch(&query).await?;
    tracing::info!(
        array = %query.credit_score_array,
        borrower = %query.borrower_address,
        score = %score,
        "Credit score fetched"
    );
    Ok(encode_uint256(score))
}
