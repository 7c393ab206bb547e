//! Enumeration of liquidity program generations.
//!
//! Each pool belongs to one program generation, which fixes both the pool
//! account layout and the pricing curve. The enum is used to label venues in
//! logs and errors.

use std::fmt::Display;

use solana_pubkey::Pubkey;

use crate::{
    config::{
        LIQUIDITY_POOL_PROGRAM_ID_V2, LIQUIDITY_POOL_PROGRAM_ID_V3, LIQUIDITY_POOL_PROGRAM_ID_V4,
        LIQUIDITY_POOL_PROGRAM_ID_V5,
    },
    layout::LayoutId,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PoolProtocol {
    /// Second-generation constant-product pools.
    RaydiumLegacy,
    RaydiumV3,
    RaydiumV4,
    /// Stable-curve pools.
    RaydiumStable,
}

impl PoolProtocol {
    /// The protocol whose pools are stored with `layout`, if it is a pool layout.
    pub fn from_layout(layout: LayoutId) -> Option<Self> {
        match layout {
            LayoutId::AmmLegacy => Some(PoolProtocol::RaydiumLegacy),
            LayoutId::AmmV3 => Some(PoolProtocol::RaydiumV3),
            LayoutId::AmmV4 => Some(PoolProtocol::RaydiumV4),
            LayoutId::AmmStable => Some(PoolProtocol::RaydiumStable),
            _ => None,
        }
    }

    pub fn layout(&self) -> LayoutId {
        match self {
            PoolProtocol::RaydiumLegacy => LayoutId::AmmLegacy,
            PoolProtocol::RaydiumV3 => LayoutId::AmmV3,
            PoolProtocol::RaydiumV4 => LayoutId::AmmV4,
            PoolProtocol::RaydiumStable => LayoutId::AmmStable,
        }
    }

    pub fn program_id(&self) -> Pubkey {
        match self {
            PoolProtocol::RaydiumLegacy => LIQUIDITY_POOL_PROGRAM_ID_V2,
            PoolProtocol::RaydiumV3 => LIQUIDITY_POOL_PROGRAM_ID_V3,
            PoolProtocol::RaydiumV4 => LIQUIDITY_POOL_PROGRAM_ID_V4,
            PoolProtocol::RaydiumStable => LIQUIDITY_POOL_PROGRAM_ID_V5,
        }
    }
}

impl Display for PoolProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from(*self))
    }
}

impl From<PoolProtocol> for String {
    fn from(protocol: PoolProtocol) -> Self {
        match protocol {
            PoolProtocol::RaydiumLegacy => "Raydium AMM V2".to_string(),
            PoolProtocol::RaydiumV3 => "Raydium AMM V3".to_string(),
            PoolProtocol::RaydiumV4 => "Raydium AMM V4".to_string(),
            PoolProtocol::RaydiumStable => "Raydium Stable".to_string(),
        }
    }
}
