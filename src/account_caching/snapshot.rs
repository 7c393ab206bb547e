//! Remote snapshot cache of program accounts.
//!
//! A snapshot is a precomputed list of `(pubkey, account)` pairs published
//! under a logical cache name. It is a pure performance optimisation: every
//! failure here surfaces as [`AccountCacheError::CacheUnavailable`] and is
//! absorbed by [`fetch_cached_or_many`](super::fetch_cached_or_many).

use std::str::FromStr;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use solana_account::Account;
use solana_pubkey::Pubkey;

use crate::{account_caching::AccountCacheError, config::SourceConfig};

#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Fetch the snapshot published under `cache_name`.
    ///
    /// Entries whose account is `None` are accounts the snapshot records as
    /// absent.
    async fn get_cached_accounts(
        &self,
        cache_name: &str,
    ) -> Result<Vec<(Pubkey, Option<Account>)>, AccountCacheError>;
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    result: Vec<SnapshotEntry>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    pubkey: String,
    account: Option<SnapshotAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotAccount {
    /// `[payload, encoding]`
    data: (String, String),
    executable: bool,
    owner: String,
    lamports: u64,
    #[serde(default)]
    rent_epoch: u64,
}

fn unavailable(reason: impl ToString) -> AccountCacheError {
    AccountCacheError::CacheUnavailable(reason.to_string())
}

/// Parse a snapshot payload.
///
/// Only base64 account data is accepted.
pub fn parse_snapshot(body: &str) -> Result<Vec<(Pubkey, Option<Account>)>, AccountCacheError> {
    let response: SnapshotResponse = serde_json::from_str(body).map_err(unavailable)?;

    response
        .result
        .into_iter()
        .map(|entry| {
            let pubkey = Pubkey::from_str(&entry.pubkey).map_err(unavailable)?;
            let account = match entry.account {
                Some(account) => Some(account.into_account()?),
                None => None,
            };
            Ok((pubkey, account))
        })
        .collect()
}

impl SnapshotAccount {
    fn into_account(self) -> Result<Account, AccountCacheError> {
        let (payload, encoding) = self.data;
        if encoding != "base64" {
            return Err(unavailable(format!("unsupported encoding {encoding}")));
        }
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(unavailable)?;
        let owner = Pubkey::from_str(&self.owner).map_err(unavailable)?;

        Ok(Account {
            lamports: self.lamports,
            data,
            owner,
            executable: self.executable,
            rent_epoch: self.rent_epoch,
        })
    }
}

/// Snapshot cache served over HTTP at `<base_url><cache_name>`.
pub struct HttpSnapshotCache {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSnapshotCache {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(config.snapshot_url.clone())
    }

    pub fn url_for(&self, cache_name: &str) -> String {
        format!("{}{}", self.base_url, cache_name)
    }
}

#[async_trait]
impl SnapshotCache for HttpSnapshotCache {
    async fn get_cached_accounts(
        &self,
        cache_name: &str,
    ) -> Result<Vec<(Pubkey, Option<Account>)>, AccountCacheError> {
        let body = self
            .client
            .get(self.url_for(cache_name))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(unavailable)?
            .text()
            .await
            .map_err(unavailable)?;

        parse_snapshot(&body)
    }
}
