//! Core traits and data structures for read-side liquidity venues.
//!
//! A "trading venue" is one on-chain liquidity pool viewed through its
//! decoded state. Implementers are responsible for decoding the pool account,
//! declaring which other accounts they need, refreshing their state from an
//! [`AccountSource`] and answering price and quote requests from that state.
//! No venue ever builds or signs a transaction.

pub mod error;
pub mod protocol;
pub mod token_info;

use async_trait::async_trait;
use rust_decimal::Decimal;
use solana_account::Account;
use solana_pubkey::Pubkey;

use crate::{
    account_caching::AccountSource,
    pricing::TokenAmount,
    trading_venue::{error::TradingVenueError, protocol::PoolProtocol, token_info::TokenInfo},
};

/// Request structure passed to a venue's `quote()`.
///
/// `amount` is in whole tokens of the input mint (UI units, not atoms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Mint of the token the user is providing.
    pub input_mint: Pubkey,

    /// Mint of the token the user expects to receive.
    pub output_mint: Pubkey,

    /// Amount of input, in whole tokens.
    pub amount: Decimal,

    /// Tolerated slippage in percent; how it is applied depends on the curve.
    pub slippage_pct: Decimal,
}

/// A result returned from a venue's `quote()` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResult {
    /// Mint of the token the user provided.
    pub input_mint: Pubkey,

    /// Mint of the token the user receives.
    pub output_mint: Pubkey,

    /// Input amount the quote was computed for, in whole tokens.
    pub amount: Decimal,

    /// Expected output, in atoms of the output mint.
    pub expected_output: TokenAmount,

    /// `false` when the pool cannot service the pair or holds no liquidity.
    ///
    /// An unroutable quote always carries a zero `expected_output`.
    pub routable: bool,
}

/// A convenience trait for converting on-chain accounts into structured venue state.
pub trait FromAccount {
    /// Parse an on-chain Solana account into the venue's internal state structure.
    ///
    /// `pubkey` is the address of the account; `account` is its data.
    fn from_account(pubkey: &Pubkey, account: &Account) -> Result<Self, TradingVenueError>
    where
        Self: Sized;
}

/// Primary trait describing a liquidity venue.
#[async_trait]
pub trait TradingVenue: Send + Sync {
    /// Whether the venue has loaded everything it needs to quote.
    fn initialized(&self) -> bool;

    /// The program that owns the venue's pool account.
    fn program_id(&self) -> Pubkey;

    /// Unique identifier for the market/pool instance.
    fn market_id(&self) -> Pubkey;

    /// Return the mint pubkeys for all tokens traded in this venue.
    ///
    /// The default implementation pulls these from the venue's `TokenInfo`.
    fn tradable_mints(&self) -> Result<Vec<Pubkey>, TradingVenueError> {
        Ok(self.get_token_info().iter().map(|x| x.pubkey).collect())
    }

    /// Return the decimals for each tradable token.
    fn decimals(&self) -> Result<Vec<u8>, TradingVenueError> {
        Ok(self.get_token_info().iter().map(|x| x.decimals).collect())
    }

    /// Token metadata for this venue, loaded by `update_state()`.
    fn get_token_info(&self) -> &[TokenInfo];

    /// Fetch a single token by index.
    fn get_token(&self, i: usize) -> Result<&TokenInfo, TradingVenueError> {
        self.get_token_info()
            .get(i)
            .ok_or_else(|| TradingVenueError::MissingState(format!("token index {i}").into()))
    }

    /// Which program generation this venue belongs to.
    fn protocol(&self) -> PoolProtocol;

    /// A human-readable label describing the venue's protocol.
    fn label(&self) -> String {
        self.protocol().into()
    }

    /// Returns the set of pubkeys read by `update_state()`.
    fn get_required_pubkeys_for_update(&self) -> Result<Vec<Pubkey>, TradingVenueError>;

    /// Refresh the venue's state from `source`.
    async fn update_state(&mut self, source: &dyn AccountSource) -> Result<(), TradingVenueError>;

    /// Price of one side in units of the other; see [`crate::pricing::spot_price`].
    fn spot_price(&self, coin_base: bool) -> Result<Decimal, TradingVenueError>;

    /// Compute a quote for the given swap parameters.
    ///
    /// A zero input amount or an unknown mint pair is answered with a zero
    /// quote, never an error.
    fn quote(&self, request: QuoteRequest) -> Result<QuoteResult, TradingVenueError>;
}
