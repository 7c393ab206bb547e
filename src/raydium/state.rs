//! Typed views over decoded pool and stake records.
//!
//! Each view accepts a record of any registered generation of its entity and
//! normalises the differences: fields missing from older generations become
//! `None`, and narrower integers are widened.

use solana_pubkey::Pubkey;

use crate::{
    layout::{LayoutError, LayoutId, Record, decode_with},
    pricing::StableParams,
};

#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmStatus {
    Uninitialized = 0u64,
    Initialized = 1u64,
    Disabled = 2u64,
    WithdrawOnly = 3u64,
    // pool only can add or remove liquidity, can't swap and plan orders
    LiquidityOnly = 4u64,
    // pool only can add or remove liquidity and plan orders, can't swap
    OrderBookOnly = 5u64,
    // pool only can add or remove liquidity and swap, can't plan orders
    SwapOnly = 6u64,
    // pool status after created and will auto update to SwapOnly during swap after open_time
    WaitingTrade = 7u64,
}

impl AmmStatus {
    pub fn from_u64(status: u64) -> Option<Self> {
        match status {
            0u64 => Some(AmmStatus::Uninitialized),
            1u64 => Some(AmmStatus::Initialized),
            2u64 => Some(AmmStatus::Disabled),
            3u64 => Some(AmmStatus::WithdrawOnly),
            4u64 => Some(AmmStatus::LiquidityOnly),
            5u64 => Some(AmmStatus::OrderBookOnly),
            6u64 => Some(AmmStatus::SwapOnly),
            7u64 => Some(AmmStatus::WaitingTrade),
            _ => None,
        }
    }

    /// Whether reserves of a pool in this status are meaningful for pricing.
    pub fn is_priceable(&self) -> bool {
        !matches!(self, AmmStatus::Uninitialized | AmmStatus::Disabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapFee {
    pub numerator: u64,
    pub denominator: u64,
}

/// A liquidity pool account, any generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmInfo {
    pub layout: LayoutId,
    pub status: u64,
    /// Nonce of the pool authority's program address.
    pub nonce: u64,
    pub coin_decimals: u64,
    pub pc_decimals: u64,
    /// Pnl owed to the protocol, still held in the coin vault.
    pub need_take_pnl_coin: u64,
    /// Pnl owed to the protocol, still held in the pc vault.
    pub need_take_pnl_pc: u64,
    pub pool_coin_token_account: Pubkey,
    pub pool_pc_token_account: Pubkey,
    pub coin_mint: Pubkey,
    pub pc_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub amm_open_orders: Pubkey,
    pub serum_market: Pubkey,
    pub serum_program_id: Pubkey,
    pub amm_target_orders: Pubkey,
    pub amm_owner: Pubkey,
    /// Only V4 and stable pools store a swap fee fraction.
    pub swap_fee: Option<SwapFee>,
    /// Only stable pools carry curve parameters.
    pub stable: Option<StableParams>,
}

impl AmmInfo {
    pub fn decode(layout: LayoutId, data: &[u8]) -> Result<Self, LayoutError> {
        Self::from_record(&decode_with(layout, data)?)
    }

    pub fn from_record(record: &Record) -> Result<Self, LayoutError> {
        let swap_fee = if record.has("swap_fee_numerator") {
            Some(SwapFee {
                numerator: record.u64("swap_fee_numerator")?,
                denominator: record.u64("swap_fee_denominator")?,
            })
        } else {
            None
        };

        let stable = if record.has("current_k") {
            Some(StableParams {
                current_k: record.u128("current_k")?,
                amm_max_price: Some(record.u64("amm_max_price")?).filter(|p| *p != 0),
                amm_middle_price: Some(record.u64("amm_middle_price")?).filter(|p| *p != 0),
            })
        } else {
            None
        };

        Ok(Self {
            layout: record.layout(),
            status: record.u64("status")?,
            nonce: record.u64("nonce")?,
            coin_decimals: record.u64("coin_decimals")?,
            pc_decimals: record.u64("pc_decimals")?,
            need_take_pnl_coin: record.u64("need_take_pnl_coin")?,
            need_take_pnl_pc: record.u64("need_take_pnl_pc")?,
            pool_coin_token_account: record.pubkey("pool_coin_token_account")?,
            pool_pc_token_account: record.pubkey("pool_pc_token_account")?,
            coin_mint: record.pubkey("coin_mint_address")?,
            pc_mint: record.pubkey("pc_mint_address")?,
            lp_mint: record.pubkey("lp_mint_address")?,
            amm_open_orders: record.pubkey("amm_open_orders")?,
            serum_market: record.pubkey("serum_market")?,
            serum_program_id: record.pubkey("serum_program_id")?,
            amm_target_orders: record.pubkey("amm_target_orders")?,
            amm_owner: record.pubkey("amm_owner")?,
            swap_fee,
            stable,
        })
    }

    pub fn amm_status(&self) -> Option<AmmStatus> {
        AmmStatus::from_u64(self.status)
    }
}

/// One reward stream of a staking pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardStream {
    pub reward_token_account: Pubkey,
    pub total_reward: u64,
    pub per_share: u128,
    pub per_block: u64,
}

/// A staking pool account, any generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeInfo {
    pub layout: LayoutId,
    pub state: u64,
    pub nonce: u64,
    pub pool_lp_token_account: Pubkey,
    pub owner: Pubkey,
    pub last_block: u64,
    pub reward: RewardStream,
    /// Second reward stream of dual-reward pools.
    pub reward_b: Option<RewardStream>,
    /// Only legacy pools record a fee owner.
    pub fee_owner: Option<Pubkey>,
}

impl StakeInfo {
    pub fn decode(layout: LayoutId, data: &[u8]) -> Result<Self, LayoutError> {
        Self::from_record(&decode_with(layout, data)?)
    }

    pub fn from_record(record: &Record) -> Result<Self, LayoutError> {
        let (reward, reward_b, fee_owner) = if record.has("per_share") {
            let reward = RewardStream {
                reward_token_account: record.pubkey("pool_reward_token_account")?,
                total_reward: record.u64("total_reward")?,
                per_share: record.u128("per_share")?,
                per_block: record.u64("per_block")?,
            };
            let reward_b = RewardStream {
                reward_token_account: record.pubkey("pool_reward_token_account_b")?,
                total_reward: record.u64("total_reward_b")?,
                per_share: record.u128("per_share_b")?,
                per_block: record.u64("per_block_b")?,
            };
            (reward, Some(reward_b), None)
        } else {
            let reward = RewardStream {
                reward_token_account: record.pubkey("pool_reward_token_account")?,
                total_reward: record.u64("total_reward")?,
                per_share: record.u128("reward_per_share_net")?,
                per_block: record.u64("reward_per_block")?,
            };
            (reward, None, Some(record.pubkey("fee_owner")?))
        };

        Ok(Self {
            layout: record.layout(),
            state: record.u64("state")?,
            nonce: record.u64("nonce")?,
            pool_lp_token_account: record.pubkey("pool_lp_token_account")?,
            owner: record.pubkey("owner")?,
            last_block: record.u64("last_block")?,
            reward,
            reward_b,
            fee_owner,
        })
    }
}

/// A user's position in a staking pool, any generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStakeInfo {
    pub layout: LayoutId,
    pub state: u64,
    pub pool_id: Pubkey,
    pub staker_owner: Pubkey,
    pub deposit_balance: u64,
    pub reward_debt: u128,
    pub reward_debt_b: Option<u128>,
}

impl UserStakeInfo {
    pub fn decode(layout: LayoutId, data: &[u8]) -> Result<Self, LayoutError> {
        Self::from_record(&decode_with(layout, data)?)
    }

    pub fn from_record(record: &Record) -> Result<Self, LayoutError> {
        let reward_debt_b = if record.has("reward_debt_b") {
            Some(record.uint("reward_debt_b")?)
        } else {
            None
        };

        Ok(Self {
            layout: record.layout(),
            state: record.u64("state")?,
            pool_id: record.pubkey("pool_id")?,
            staker_owner: record.pubkey("staker_owner")?,
            deposit_balance: record.u64("deposit_balance")?,
            reward_debt: record.uint("reward_debt")?,
            reward_debt_b,
        })
    }
}
