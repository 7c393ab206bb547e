//! An RPC-backed account source.
//!
//! `RpcAccountSource` wraps a nonblocking `RpcClient` and implements
//! [`AccountSource`] with the node's single- and multi-account reads. It
//! keeps no state of its own; every call goes to the node, at the client's
//! configured commitment.

use async_trait::async_trait;
use log::trace;
use solana_account::Account;
use solana_pubkey::Pubkey;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;

use crate::{
    account_caching::{AccountCacheError, AccountSource},
    config::SourceConfig,
};

pub struct RpcAccountSource {
    rpc_client: RpcClient,
}

impl RpcAccountSource {
    /// Construct a new source from an existing `RpcClient`.
    pub fn new(rpc_client: RpcClient) -> Self {
        Self { rpc_client }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(RpcClient::new(config.rpc_url.clone()))
    }

    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }
}

#[async_trait]
impl AccountSource for RpcAccountSource {
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, AccountCacheError> {
        let response = self
            .rpc_client
            .get_account_with_commitment(pubkey, self.rpc_client.commitment())
            .await?;

        Ok(response.value)
    }

    async fn get_accounts(
        &self,
        pubkeys: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, AccountCacheError> {
        trace!("get_multiple_accounts for {} keys", pubkeys.len());

        let response = self.rpc_client.get_multiple_accounts(pubkeys).await?;

        if response.len() != pubkeys.len() {
            return Err(AccountCacheError::MalformedResponse {
                expected: pubkeys.len(),
                actual: response.len(),
            });
        }

        Ok(response)
    }
}
