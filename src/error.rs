use jiff::civil::Date;
use thiserror::Error;

/// Every failure is fatal: the caller stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("failure while accessing the exchange rate service: {0}")]
    Network(#[from] ureq::Error),

    #[error("exchange rate service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse exchange data: {0}")]
    Format(#[from] serde_json::Error),

    #[error("unexpected rate date {returned} for requested date {requested}")]
    Consistency { requested: Date, returned: Date },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Parse { .. } => 2,
            Self::Network(_) => 3,
            Self::Api { .. } => 4,
            Self::Format(_) => 5,
            Self::Consistency { .. } => 6,
            Self::Io(_) => 10,
        }
    }
}
