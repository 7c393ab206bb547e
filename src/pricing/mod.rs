//! Spot prices and output quotes derived from decoded pool state.
//!
//! Everything here is a pure function of a [`PoolState`]; nothing is cached
//! between calls, so pricing may run concurrently without coordination.
//!
//! Two curves are supported, each with its own slippage convention:
//!
//! - constant product: price is the reserve ratio and slippage multiplies the
//!   output by `(100 + slippage) / 100`;
//! - stable: price is the marginal price of the stable invariant and slippage
//!   divides the output by `1 - slippage / 100`.

pub mod amount;
pub mod curve;

use rust_decimal::Decimal;
use solana_pubkey::Pubkey;

pub use amount::TokenAmount;
pub use curve::{STABLE_AMPLIFIER, quote, quote_constant_product, quote_stable, spot_price};

use crate::{
    raydium::state::AmmInfo,
    trading_venue::{error::TradingVenueError, token_info::TokenAccountInfo},
};

/// Cached parameters of a stable-curve pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableParams {
    /// Curve invariant, scaled by `10^(2 * system decimals)`.
    pub current_k: u128,
    pub amm_max_price: Option<u64>,
    pub amm_middle_price: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    ConstantProduct,
    Stable(StableParams),
}

/// One side of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolToken {
    pub mint: Pubkey,
    pub balance: TokenAmount,
}

impl PoolToken {
    pub fn new(mint: Pubkey, amount: u128, decimals: u32) -> Self {
        Self {
            mint,
            balance: TokenAmount::new(amount, decimals),
        }
    }

    pub fn decimals(&self) -> u32 {
        self.balance.decimals
    }
}

/// Which way a swap crosses the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    /// Input coin, output pc.
    Coin2PC,
    /// Input pc, output coin.
    PC2Coin,
}

/// Reserves and curve of one pool, as needed for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub coin: PoolToken,
    pub pc: PoolToken,
    pub curve: CurveKind,
}

impl PoolState {
    pub fn new(coin: PoolToken, pc: PoolToken, curve: CurveKind) -> Self {
        Self { coin, pc, curve }
    }

    /// Builds pool state from a decoded pool and its two vaults.
    ///
    /// Reserves are vault balances less the pnl the pool still owes, which is
    /// not available for swaps.
    pub fn from_accounts(
        amm: &AmmInfo,
        coin_vault: &TokenAccountInfo,
        pc_vault: &TokenAccountInfo,
    ) -> Result<Self, TradingVenueError> {
        if coin_vault.mint != amm.coin_mint {
            return Err(TradingVenueError::InvalidMint(coin_vault.mint.into()));
        }
        if pc_vault.mint != amm.pc_mint {
            return Err(TradingVenueError::InvalidMint(pc_vault.mint.into()));
        }

        let coin_decimals = decimals_from(amm.coin_decimals)?;
        let pc_decimals = decimals_from(amm.pc_decimals)?;
        let coin_reserve = coin_vault.amount.saturating_sub(amm.need_take_pnl_coin);
        let pc_reserve = pc_vault.amount.saturating_sub(amm.need_take_pnl_pc);

        let curve = match amm.stable {
            Some(params) => CurveKind::Stable(params),
            None => CurveKind::ConstantProduct,
        };

        Ok(Self::new(
            PoolToken::new(amm.coin_mint, coin_reserve.into(), coin_decimals),
            PoolToken::new(amm.pc_mint, pc_reserve.into(), pc_decimals),
            curve,
        ))
    }

    pub fn has_liquidity(&self) -> bool {
        !self.coin.balance.is_zero() && !self.pc.balance.is_zero()
    }

    pub fn direction(&self, from: &Pubkey, to: &Pubkey) -> Option<SwapDirection> {
        if *from == self.coin.mint && *to == self.pc.mint {
            Some(SwapDirection::Coin2PC)
        } else if *from == self.pc.mint && *to == self.coin.mint {
            Some(SwapDirection::PC2Coin)
        } else {
            None
        }
    }

    pub fn decimals_of(&self, mint: &Pubkey) -> Option<u32> {
        if *mint == self.coin.mint {
            Some(self.coin.decimals())
        } else if *mint == self.pc.mint {
            Some(self.pc.decimals())
        } else {
            None
        }
    }

    pub fn spot_price(&self, coin_base: bool) -> Result<Decimal, TradingVenueError> {
        spot_price(self, coin_base)
    }
}

fn decimals_from(value: u64) -> Result<u32, TradingVenueError> {
    u32::try_from(value)
        .map_err(|_| TradingVenueError::DataConversionError(format!("decimals {value}").into()))
}
