pub mod batch;
pub mod rpc_source;
pub mod snapshot;

use solana_account::Account;
use solana_pubkey::Pubkey;
use thiserror::Error;

use async_trait::async_trait;

pub use batch::{
    BatchFetcher, KeyedAccount, MAX_MULTIPLE_ACCOUNTS, fetch_cached_or_many, fetch_many,
};
pub use snapshot::SnapshotCache;

/// Trait that abstracts raw account retrieval.
///
/// The batched fetcher, the liquidity venue and the mint helpers receive an
/// `&dyn AccountSource` and use it to read on-chain accounts.
///
/// Implementers must satisfy the following:
///
/// - **Thread-safety:** Trait objects must be `Send + Sync`.
/// - **Deterministic ordering:** `get_accounts()` must return accounts in the
///   same order as the input pubkeys, one slot per input (duplicates included).
/// - **Absence is not an error:** a missing account is `Ok(None)`.
///
/// Typical implementations include:
/// - `RpcAccountSource` (network-backed)
/// - Test harnesses using fixed HashMaps
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Retrieve a single account by pubkey.
    ///
    /// Returns:
    /// - `Ok(Some(Account))` if the account exists
    /// - `Ok(None)` if the account is known to be missing
    ///
    /// Errors:
    /// - Transport failures
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, AccountCacheError>;

    /// Retrieve multiple accounts in a single operation.
    ///
    /// Callers keep `pubkeys` within [`MAX_MULTIPLE_ACCOUNTS`]; use
    /// [`fetch_many`] for longer lists.
    async fn get_accounts(
        &self,
        pubkeys: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, AccountCacheError>;
}

/// Errors from the account-fetching layer.
///
/// These are *not* pricing or venue-level errors. `TransportFailure` and
/// `MalformedResponse` fail a whole batched request; `CacheUnavailable` never
/// leaves this module's fallback path.
#[derive(Debug, Error)]
pub enum AccountCacheError {
    /// The RPC transport failed.
    ///
    /// Automatically converted from `ClientError` through `#[from]`.
    #[error("Failed to fetch account: {0}")]
    TransportFailure(#[from] solana_client::client_error::ClientError),

    /// A multi-account read returned a different number of slots than requested.
    #[error("Malformed multi-account response: expected {expected} entries, got {actual}")]
    MalformedResponse { expected: usize, actual: usize },

    /// The remote snapshot cache could not serve the request.
    #[error("Snapshot cache unavailable: {0}")]
    CacheUnavailable(String),
}

/// Ensures `AccountCacheError` satisfies `Send + Sync` at compile time.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccountCacheError>();
};
