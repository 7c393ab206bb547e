//! Error types for venue state refresh and pricing.
//!
//! `TradingVenueError` is the error returned by the liquidity venue, the
//! pricing engine and the mint helpers. Layout and account-source errors are
//! wrapped through `#[from]` so callers can still match on the cause.
//!
//! `ErrorInfo` is a lightweight container for attaching consistent metadata to
//! an error (e.g., a failing pubkey or message).

use std::fmt::Display;

use solana_pubkey::Pubkey;
use thiserror::Error;

use crate::{
    account_caching::AccountCacheError, layout::LayoutError, trading_venue::protocol::PoolProtocol,
};

/// Context attached to a venue error: the account involved, or a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorInfo {
    Pubkey(Pubkey),
    String(String),
    StaticStr(&'static str),
}

impl From<Pubkey> for ErrorInfo {
    fn from(pubkey: Pubkey) -> Self {
        ErrorInfo::Pubkey(pubkey)
    }
}

impl From<&Pubkey> for ErrorInfo {
    fn from(pubkey: &Pubkey) -> Self {
        ErrorInfo::Pubkey(*pubkey)
    }
}

impl From<String> for ErrorInfo {
    fn from(string: String) -> Self {
        ErrorInfo::String(string)
    }
}

impl From<&'static str> for ErrorInfo {
    fn from(string: &'static str) -> Self {
        ErrorInfo::StaticStr(string)
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorInfo::Pubkey(pubkey) => write!(f, "{}", pubkey),
            ErrorInfo::String(string) => write!(f, "{}", string),
            ErrorInfo::StaticStr(string) => write!(f, "{}", string),
        }
    }
}

/// Errors raised while building venue state or pricing from it.
///
/// There is no variant for an unroutable mint pair: it is answered with a zero
/// quote, not an error.
#[derive(Error, Debug)]
pub enum TradingVenueError {
    /// The account source reported the account as absent.
    #[error("No account found for pubkey: {0}")]
    NoAccountFound(ErrorInfo),

    /// Failed to construct a venue from a pool account.
    #[error("Unable to build venue from account for pubkey: {0}")]
    FromAccountError(ErrorInfo),

    /// Account bytes could not be interpreted.
    #[error("Failed to deserialize account data: {0}")]
    DeserializationFailed(ErrorInfo),

    /// The venue has not yet loaded its required accounts.
    ///
    /// This usually indicates that `update_state()` was not called before
    /// attempting a quote.
    #[error("The venue has not had its accounts loaded: {0}")]
    NotInitialized(ErrorInfo),

    /// A required field of the venue's state was not loaded or set.
    #[error("The state object is not loaded: {0}")]
    MissingState(ErrorInfo),

    /// Mint provided is invalid or mismatched for the venue.
    #[error("Invalid mint: {0}")]
    InvalidMint(ErrorInfo),

    /// Decimal overflow, division by zero or a non-real curve value.
    #[error("Math Error: {0}")]
    MathError(ErrorInfo),

    /// Token amount / numeric conversion failure.
    #[error("Data conversion error: {0}")]
    DataConversionError(ErrorInfo),

    /// The pool generation is not supported by this operation.
    #[error("Unsupported venue: {0}")]
    UnsupportedVenue(ErrorInfo),

    /// A pool exists on-chain but is not usable for pricing.
    #[error("Pool {0} from protocol {1} is inactive")]
    InactivePoolError(Pubkey, PoolProtocol),

    /// Buffer did not match its layout.
    #[error("Layout error: {0}")]
    LayoutError(#[from] LayoutError),

    /// Error produced by the account-fetching layer.
    #[error("Account cache error: {0}")]
    AccountCacheError(#[from] AccountCacheError),
}
