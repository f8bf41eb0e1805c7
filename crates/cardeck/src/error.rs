#![forbid(unsafe_code)]

//! Error types for the deck.
//!
//! Only conditions a caller can act on are errors. Out-of-range selections
//! wrap to the first item and dataset-edge underflow is clamped; neither is
//! surfaced here.

use std::fmt;

/// Errors returned by [`CardDeck`](crate::deck::CardDeck) and
/// [`DeckConfig`](crate::config::DeckConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum DeckError {
    /// An operation that needs the adapter ran before one was set.
    MissingAdapter,
    /// The operation has no meaning for a windowed deck.
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// A configuration value is out of range.
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// Configuration text could not be parsed.
    #[cfg(feature = "serde")]
    ConfigParse(String),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAdapter => write!(f, "no adapter set; call set_adapter first"),
            Self::Unsupported { operation } => {
                write!(f, "operation `{operation}` is not supported by a card deck")
            }
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid deck config `{field}`: {reason}")
            }
            #[cfg(feature = "serde")]
            Self::ConfigParse(msg) => write!(f, "failed to parse deck config: {msg}"),
        }
    }
}

impl std::error::Error for DeckError {}
