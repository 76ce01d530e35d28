/// Why the callback could not produce a score.
///
/// Every failure surfaces to the invoking runtime. A score is never
/// replaced by zero, since the consumer cannot tell that apart from a real
/// zero score.
#[derive(Debug)]
pub enum OracleError {
    /// Wrong number of positional arguments.
    Arguments(usize),
    /// Base URL is unusable.
    Url(String),
    /// No response (connect, DNS, timeout, body read).
    Transport(String),
    /// Upstream answered with a non-2xx status.
    Status { status: u16, body: String },
    /// Body did not hold a non-negative integer.
    InvalidBody(String),
    /// Value does not fit in 256 bits.
    Overflow,
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arguments(n) => write!(f, "expected 2 arguments, got {n}"),
            Self::Url(msg) => write!(f, "invalid url: {msg}"),
            Self::Transport(msg) => write!(f, "request failed: {msg}"),
            Self::Status { status, body } => write!(f, "upstream returned {status}: {body}"),
            Self::InvalidBody(msg) => write!(f, "invalid score body: {msg}"),
            Self::Overflow => write!(f, "score does not fit in uint256"),
        }
    }
}

impl std::error::Error for OracleError {}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
