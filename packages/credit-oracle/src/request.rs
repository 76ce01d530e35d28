//! Upstream request construction.

use url::Url;

use crate::OracleError;

/// Stormbit score endpoint the oracle reads from.
pub const DEFAULT_BASE_URL: &str = "https://api.stormbit/api/creditScores";

/// Positional arguments handed over by the oracle runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreQuery {
    pub credit_score_array: String,
    pub borrower_address: String,
}

impl ScoreQuery {
    pub fn new(credit_score_array: impl Into<String>, borrower_address: impl Into<String>) -> Self {
        Self {
            credit_score_array: credit_score_array.into(),
            borrower_address: borrower_address.into(),
        }
    }

    /// `args[0]` is the score-array id, `args[1]` the borrower.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, OracleError> {
        match args {
            [array, borrower] => Ok(Self::new(array.as_ref(), borrower.as_ref())),
            _ => Err(OracleError::Arguments(args.len())),
        }
    }

    /// `{base}/{credit_score_array}/{borrower_address}`
    pub fn url(&self, base: &str) -> Result<Url, OracleError> {
        let mut url = Url::parse(base).map_err(|e| OracleError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| OracleError::Url(format!("{base} cannot carry path segments")))?
            .pop_if_empty()
            .push(&self.credit_score_array)
            .push(&self.borrower_address);
        Ok(url)
    }
}
