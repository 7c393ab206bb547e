//! Read-side access to Raydium liquidity and staking accounts.
//!
//! - [`layout`] decodes every supported account generation from raw bytes.
//! - [`account_caching`] fetches accounts in concurrent, order-preserving
//!   batches, optionally from a remote snapshot first.
//! - [`pricing`] derives spot prices and slippage-adjusted quotes from pool
//!   state.
//! - [`raydium`] ties these together as a refreshable liquidity venue, plus
//!   an indexed registry of known pools.

pub mod account_caching;
pub mod config;
pub mod layout;
pub mod pricing;
pub mod raydium;
pub mod trading_venue;
