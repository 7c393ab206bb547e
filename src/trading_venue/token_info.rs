//! Token metadata and helpers.
//!
//! `MintInfo` and `TokenAccountInfo` are typed views over the SPL mint and
//! token account layouts. `TokenInfo` pairs a mint's decimals with a display
//! symbol taken from a [`TokenRegistry`]; symbols only ever label output and
//! never feed into pricing.

use ahash::AHashMap;
use log::debug;
use solana_account::Account;
use solana_pubkey::Pubkey;

use crate::{
    account_caching::{AccountSource, fetch_many},
    layout::{LayoutError, LayoutId, Record, decode_with},
    trading_venue::error::TradingVenueError,
};

/// Symbol used for mints the registry does not know.
pub const UNKNOWN_SYMBOL: &str = "unknown";

/// An SPL mint account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintInfo {
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<Pubkey>,
}

fn optional_key(
    record: &Record,
    tag: &'static str,
    key: &'static str,
) -> Result<Option<Pubkey>, LayoutError> {
    Ok(match record.u32(tag)? {
        0 => None,
        _ => Some(record.pubkey(key)?),
    })
}

impl MintInfo {
    pub fn decode(data: &[u8]) -> Result<Self, LayoutError> {
        let record = decode_with(LayoutId::Mint, data)?;
        Ok(Self {
            mint_authority: optional_key(&record, "mint_authority_option", "mint_authority")?,
            supply: record.u64("supply")?,
            decimals: record.u8("decimals")?,
            is_initialized: record.u8("is_initialized")? != 0,
            freeze_authority: optional_key(&record, "freeze_authority_option", "freeze_authority")?,
        })
    }
}

/// An SPL token account; pool vaults are token accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountInfo {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl TokenAccountInfo {
    pub fn decode(data: &[u8]) -> Result<Self, LayoutError> {
        let record = decode_with(LayoutId::TokenAccount, data)?;
        Ok(Self {
            mint: record.pubkey("mint")?,
            owner: record.pubkey("owner")?,
            amount: record.u64("amount")?,
        })
    }
}

/// Display metadata for a mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMeta {
    pub symbol: String,
    pub decimals: u8,
}

/// Lookup of known token metadata by mint.
pub trait TokenRegistry: Send + Sync {
    fn lookup(&self, mint: &Pubkey) -> Option<TokenMeta>;

    /// Symbol for `mint`, or [`UNKNOWN_SYMBOL`] when the mint is unknown.
    fn label(&self, mint: &Pubkey) -> String {
        self.lookup(mint)
            .map(|meta| meta.symbol)
            .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string())
    }
}

/// A fixed, in-memory token registry.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenRegistry {
    tokens: AHashMap<Pubkey, TokenMeta>,
}

impl StaticTokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, mint: Pubkey, symbol: &str, decimals: u8) -> Self {
        self.insert(mint, symbol, decimals);
        self
    }

    pub fn insert(&mut self, mint: Pubkey, symbol: &str, decimals: u8) {
        self.tokens.insert(
            mint,
            TokenMeta {
                symbol: symbol.to_string(),
                decimals,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenRegistry for StaticTokenRegistry {
    fn lookup(&self, mint: &Pubkey) -> Option<TokenMeta> {
        self.tokens.get(mint).cloned()
    }
}

/// A mint as presented to users: address, decimals and display symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// Mint address of the token.
    pub pubkey: Pubkey,

    /// Number of decimal places a UI token amount should be scaled by.
    pub decimals: u8,

    pub symbol: String,
}

impl TokenInfo {
    /// Construct `TokenInfo` by decoding a mint account.
    ///
    /// # Errors
    /// Returns `TradingVenueError::DeserializationFailed` if the account is not
    /// an SPL mint.
    pub fn new(
        pubkey: &Pubkey,
        account: &Account,
        registry: &dyn TokenRegistry,
    ) -> Result<Self, TradingVenueError> {
        let mint = MintInfo::decode(&account.data)
            .map_err(|_| TradingVenueError::DeserializationFailed(pubkey.into()))?;

        Ok(TokenInfo {
            pubkey: *pubkey,
            decimals: mint.decimals,
            symbol: registry.label(pubkey),
        })
    }
}

/// Decimals of a single mint, read from the chain.
pub async fn mint_decimals(
    source: &dyn AccountSource,
    mint: &Pubkey,
) -> Result<u8, TradingVenueError> {
    let account = source
        .get_account(mint)
        .await?
        .ok_or(TradingVenueError::NoAccountFound(mint.into()))?;

    Ok(MintInfo::decode(&account.data)?.decimals)
}

/// Metadata for an LP mint: from the registry when known, otherwise decoded
/// from the mint account and labelled [`UNKNOWN_SYMBOL`].
pub async fn lp_mint_info(
    source: &dyn AccountSource,
    registry: &dyn TokenRegistry,
    lp_mint: &Pubkey,
) -> Result<TokenInfo, TradingVenueError> {
    if let Some(meta) = registry.lookup(lp_mint) {
        return Ok(TokenInfo {
            pubkey: *lp_mint,
            decimals: meta.decimals,
            symbol: meta.symbol,
        });
    }

    let account = source
        .get_account(lp_mint)
        .await?
        .ok_or(TradingVenueError::NoAccountFound(lp_mint.into()))?;

    TokenInfo::new(lp_mint, &account, registry)
}

/// Decimals for each of `mints`.
///
/// Registry entries are used as-is; the remaining mints are read in one
/// batched request. Mints that exist in neither place are left out of the map.
pub async fn lp_mint_decimals(
    source: &dyn AccountSource,
    registry: &dyn TokenRegistry,
    mints: &[Pubkey],
) -> Result<AHashMap<Pubkey, u8>, TradingVenueError> {
    let mut decimals = AHashMap::default();
    let mut unknown = Vec::new();

    for mint in mints {
        match registry.lookup(mint) {
            Some(meta) => {
                decimals.insert(*mint, meta.decimals);
            }
            None => unknown.push(*mint),
        }
    }

    debug!(
        "{} of {} mints resolved from the registry",
        mints.len() - unknown.len(),
        mints.len()
    );

    for keyed in fetch_many(source, &unknown).await?.into_iter().flatten() {
        let mint = MintInfo::decode(&keyed.account.data)?;
        decimals.insert(keyed.pubkey, mint.decimals);
    }

    Ok(decimals)
}
