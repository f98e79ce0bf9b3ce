//! Domain error types.

/// Top-level error type for sigperf.
#[derive(Debug, thiserror::Error)]
pub enum SigperfError {
    #[error("division by zero: price before index {index} is 0")]
    DivisionByZero { index: usize },

    #[error("non-finite return at index {index}: price change overflows f64")]
    NonFiniteReturn { index: usize },

    #[error("non-finite {statistic} while computing the Sharpe ratio")]
    NonFiniteStatistic { statistic: &'static str },

    #[error("insufficient data: have {returns} defined returns, need {minimum}")]
    InsufficientData { returns: usize, minimum: usize },

    #[error("degenerate input: returns have zero variance")]
    DegenerateInput,

    #[error("length mismatch: {prices} prices but {signals} signals")]
    LengthMismatch { prices: usize, signals: usize },

    #[error("empty price series")]
    EmptySeries,

    #[error("data parse error at record {line}: {reason}")]
    DataParse { line: usize, reason: String },

    #[error("invalid signal code {value} (expected 1, 0 or -1)")]
    SignalCode { value: i64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SigperfError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            SigperfError::Io(_) => 1,
            SigperfError::ConfigParse { .. } | SigperfError::ConfigInvalid { .. } => 2,
            SigperfError::DataParse { .. }
            | SigperfError::SignalCode { .. }
            | SigperfError::LengthMismatch { .. }
            | SigperfError::EmptySeries => 3,
            SigperfError::DivisionByZero { .. }
            | SigperfError::NonFiniteReturn { .. }
            | SigperfError::NonFiniteStatistic { .. } => 4,
            SigperfError::InsufficientData { .. } | SigperfError::DegenerateInput => 5,
        }
    }
}

impl From<&SigperfError> for std::process::ExitCode {
    fn from(err: &SigperfError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
