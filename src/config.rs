//! Program constants and source configuration.

use serde::Deserialize;
use solana_pubkey::Pubkey;

use crate::account_caching::MAX_MULTIPLE_ACCOUNTS;

pub const LIQUIDITY_POOL_PROGRAM_ID_V2: Pubkey =
    Pubkey::from_str_const("RVKd61ztZW9GUwhRbbLoYVRE5Xf1B2tVscKqwZqXgEr");
pub const LIQUIDITY_POOL_PROGRAM_ID_V3: Pubkey =
    Pubkey::from_str_const("27haf8L6oxUeXrHrgEgsexjSY5hbVUWEmvv9Nyxg8vQv");
pub const LIQUIDITY_POOL_PROGRAM_ID_V4: Pubkey =
    Pubkey::from_str_const("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");
pub const LIQUIDITY_POOL_PROGRAM_ID_V5: Pubkey =
    Pubkey::from_str_const("5quBtoiQqxF9Jv6KYKctB59NT3gtJD2Y65kdnB1Uev3h");

pub const TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Wrapped SOL mint.
pub const WSOL_MINT: Pubkey =
    Pubkey::from_str_const("So11111111111111111111111111111111111111112");

/// Placeholder mint used by pool lists for native SOL.
pub const NATIVE_SOL_MINT: Pubkey = Pubkey::from_str_const("11111111111111111111111111111111");

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_SNAPSHOT_URL: &str = "https://api.raydium.io/cache/rpc/";

/// Where accounts are read from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub rpc_url: String,
    /// Prefix the snapshot cache name is appended to.
    pub snapshot_url: String,
    /// Keys per multi-account read, clamped to `1..=100`.
    pub chunk_size: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            snapshot_url: DEFAULT_SNAPSHOT_URL.to_string(),
            chunk_size: MAX_MULTIPLE_ACCOUNTS,
        }
    }
}

impl SourceConfig {
    /// Parse a JSON config; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
