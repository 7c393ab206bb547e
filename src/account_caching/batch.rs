//! Batched multi-account retrieval.
//!
//! Long key lists are split into contiguous chunks of at most
//! [`MAX_MULTIPLE_ACCOUNTS`], every chunk is dispatched concurrently, and the
//! replies are joined in submission order. The result is aligned 1:1 with the
//! input: position `i` answers `pubkeys[i]`, duplicates included, and a
//! missing account is `None` at its own position.

use ahash::AHashMap;
use futures::future::try_join_all;
use log::{debug, warn};
use solana_account::Account;
use solana_pubkey::Pubkey;

use crate::{
    account_caching::{AccountCacheError, AccountSource, SnapshotCache},
    config::SourceConfig,
};

/// Upper bound of keys accepted by one multi-account read.
pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;

/// An account together with the address it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedAccount {
    pub pubkey: Pubkey,
    pub account: Account,
}

/// Fetch `pubkeys` from `source` in chunks of [`MAX_MULTIPLE_ACCOUNTS`].
pub async fn fetch_many(
    source: &dyn AccountSource,
    pubkeys: &[Pubkey],
) -> Result<Vec<Option<KeyedAccount>>, AccountCacheError> {
    BatchFetcher::default().fetch_many(source, pubkeys).await
}

/// Serve `pubkeys` from the snapshot named `cache_name`, falling back to
/// [`fetch_many`] on any cache failure.
pub async fn fetch_cached_or_many(
    cache: &dyn SnapshotCache,
    source: &dyn AccountSource,
    cache_name: &str,
    pubkeys: &[Pubkey],
) -> Result<Vec<Option<KeyedAccount>>, AccountCacheError> {
    BatchFetcher::default()
        .fetch_cached_or_many(cache, source, cache_name, pubkeys)
        .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchFetcher {
    chunk_size: usize,
}

impl Default for BatchFetcher {
    fn default() -> Self {
        Self {
            chunk_size: MAX_MULTIPLE_ACCOUNTS,
        }
    }
}

impl BatchFetcher {
    /// `chunk_size` is clamped to `1..=MAX_MULTIPLE_ACCOUNTS`.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.clamp(1, MAX_MULTIPLE_ACCOUNTS),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(config.chunk_size)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fetch `pubkeys`, one multi-account read per chunk, all chunks in flight
    /// at once.
    ///
    /// Fails only when the source itself fails (or answers a chunk with the
    /// wrong number of slots); absent accounts are not failures.
    pub async fn fetch_many(
        &self,
        source: &dyn AccountSource,
        pubkeys: &[Pubkey],
    ) -> Result<Vec<Option<KeyedAccount>>, AccountCacheError> {
        if pubkeys.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            "Fetching {} accounts in {} chunks",
            pubkeys.len(),
            pubkeys.len().div_ceil(self.chunk_size)
        );

        // try_join_all yields results in future order, not completion order.
        let chunks = try_join_all(pubkeys.chunks(self.chunk_size).map(|chunk| async move {
            let accounts = source.get_accounts(chunk).await?;
            if accounts.len() != chunk.len() {
                return Err(AccountCacheError::MalformedResponse {
                    expected: chunk.len(),
                    actual: accounts.len(),
                });
            }
            Ok::<_, AccountCacheError>(accounts)
        }))
        .await?;

        let result = chunks
            .into_iter()
            .flatten()
            .zip(pubkeys)
            .map(|(account, pubkey)| {
                account.map(|account| KeyedAccount {
                    pubkey: *pubkey,
                    account,
                })
            })
            .collect::<Vec<_>>();

        debug!(
            "Fetched {}/{} accounts",
            result.iter().filter(|slot| slot.is_some()).count(),
            pubkeys.len()
        );

        Ok(result)
    }

    pub async fn fetch_cached_or_many(
        &self,
        cache: &dyn SnapshotCache,
        source: &dyn AccountSource,
        cache_name: &str,
        pubkeys: &[Pubkey],
    ) -> Result<Vec<Option<KeyedAccount>>, AccountCacheError> {
        match self.from_snapshot(cache, cache_name, pubkeys).await {
            Ok(accounts) => Ok(accounts),
            Err(err) => {
                warn!("Snapshot {cache_name:?} not used, reading from source: {err}");
                self.fetch_many(source, pubkeys).await
            }
        }
    }

    async fn from_snapshot(
        &self,
        cache: &dyn SnapshotCache,
        cache_name: &str,
        pubkeys: &[Pubkey],
    ) -> Result<Vec<Option<KeyedAccount>>, AccountCacheError> {
        if cache_name.is_empty() {
            return Err(AccountCacheError::CacheUnavailable(
                "empty cache name".to_string(),
            ));
        }

        let snapshot = cache.get_cached_accounts(cache_name).await?;

        // First entry wins if the snapshot repeats a key.
        let mut index: AHashMap<Pubkey, Option<Account>> = AHashMap::default();
        for (pubkey, account) in snapshot {
            index.entry(pubkey).or_insert(account);
        }

        pubkeys
            .iter()
            .map(|pubkey| match index.get(pubkey) {
                Some(account) => Ok(account.clone().map(|account| KeyedAccount {
                    pubkey: *pubkey,
                    account,
                })),
                None => Err(AccountCacheError::CacheUnavailable(format!(
                    "{pubkey} missing from snapshot"
                ))),
            })
            .collect()
    }
}
