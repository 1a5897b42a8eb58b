//! Validation errors for user-supplied arguments and domain invariants.
//!
//! These are raised before any network call is made. The CLI reports them
//! and exits non-zero.
//!
//! # Examples
//!
//! ```
//! use pmctl::domain::error::ValidationError;
//! use pmctl::domain::money::ShareCount;
//! use rust_decimal_macros::dec;
//!
//! let result = ShareCount::try_new(dec!(0));
//! assert!(matches!(result, Err(ValidationError::NonPositiveSize { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors for malformed or missing arguments and violated domain invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required argument was not supplied.
    #[error("missing required argument: --{name}")]
    MissingArgument {
        /// Flag name without the leading dashes.
        name: &'static str,
    },

    /// An argument was supplied but could not be used.
    #[error("invalid value for --{name}: {reason}")]
    InvalidArgument {
        /// Flag name without the leading dashes.
        name: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// Two mutually exclusive arguments were both supplied.
    #[error("--{first} cannot be combined with --{second}")]
    ConflictingArguments {
        /// First flag name.
        first: &'static str,
        /// Second flag name.
        second: &'static str,
    },

    /// Identifier input was empty or whitespace.
    #[error("identifier is empty")]
    EmptyIdentifier,

    /// URL input did not contain a path segment to use as a slug.
    #[error("no event slug found in URL '{url}'")]
    MissingSlug {
        /// The URL that was supplied.
        url: String,
    },

    /// Prices are probabilities and must lie strictly inside (0, 1).
    #[error("price must be between 0 and 1 (exclusive), got {price}")]
    PriceOutOfRange {
        /// The rejected price.
        price: Decimal,
    },

    /// Sizes must be strictly positive.
    #[error("size must be positive, got {size}")]
    NonPositiveSize {
        /// The rejected size.
        size: Decimal,
    },

    /// Tick size is not one the exchange supports.
    #[error("unsupported tick size '{value}' (expected 0.1, 0.01, 0.001 or 0.0001)")]
    UnsupportedTickSize {
        /// The rejected tick size text.
        value: String,
    },

    /// Limit price does not sit on the market's tick grid.
    #[error("price {price} is not a multiple of tick size {tick} within [{tick}, 1 - {tick}]")]
    PriceOffTick {
        /// The rejected price.
        price: Decimal,
        /// The market tick size.
        tick: Decimal,
    },
}
