//! Known liquidity pools and indexed lookups over them.
//!
//! The registry is built once from a fixed pool list. Every lookup answers
//! with the same pool a front-to-back scan of that list would find first.
//! Pools are indexed under the mints they are listed with; only the mints of
//! a query are normalised.

use ahash::AHashMap;
use solana_pubkey::Pubkey;

use crate::{
    config::{NATIVE_SOL_MINT, WSOL_MINT},
    layout::{EntityKind, LayoutId, LayoutVersion},
};

/// Pool version whose pools are listed by [`PoolRegistry::pools_for_pair`].
pub const ROUTABLE_POOL_VERSION: u8 = 4;

/// Static description of a known pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityPoolInfo {
    pub name: String,
    pub amm_id: Pubkey,
    pub serum_market: Pubkey,
    pub coin_mint: Pubkey,
    pub pc_mint: Pubkey,
    pub lp_mint: Pubkey,
    /// Program generation: 2, 3, 4 or 5 (stable).
    pub version: u8,
}

impl LiquidityPoolInfo {
    /// Layout of this pool's account.
    pub fn layout(&self) -> Option<LayoutId> {
        LayoutVersion::from_pool_version(self.version)
            .and_then(|version| LayoutId::new(EntityKind::AmmInfo, version))
    }

    fn holds(&self, mint: &Pubkey) -> bool {
        self.coin_mint == *mint || self.pc_mint == *mint
    }
}

/// Pool lists name native SOL by a placeholder mint; wrapped SOL maps onto it.
pub fn normalize_mint(mint: Pubkey) -> Pubkey {
    if mint == WSOL_MINT { NATIVE_SOL_MINT } else { mint }
}

type PairKey = (Pubkey, Pubkey);

fn pair_key(a: Pubkey, b: Pubkey) -> PairKey {
    if a <= b { (a, b) } else { (b, a) }
}

fn query_key(a: Pubkey, b: Pubkey) -> PairKey {
    pair_key(normalize_mint(a), normalize_mint(b))
}

#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    pools: Vec<LiquidityPoolInfo>,
    // Index vectors are ascending, so their head is the first match.
    by_pair: AHashMap<PairKey, Vec<usize>>,
    by_pair_version: AHashMap<(PairKey, u8), Vec<usize>>,
    by_id: AHashMap<Pubkey, Vec<usize>>,
    by_lp_mint: AHashMap<Pubkey, usize>,
}

impl PoolRegistry {
    pub fn new(pools: Vec<LiquidityPoolInfo>) -> Self {
        let mut registry = Self {
            pools,
            ..Default::default()
        };

        for (index, pool) in registry.pools.iter().enumerate() {
            let pair = pair_key(pool.coin_mint, pool.pc_mint);
            registry.by_pair.entry(pair).or_default().push(index);
            registry
                .by_pair_version
                .entry((pair, pool.version))
                .or_default()
                .push(index);

            registry.by_id.entry(pool.amm_id).or_default().push(index);
            if pool.serum_market != pool.amm_id {
                registry.by_id.entry(pool.serum_market).or_default().push(index);
            }

            registry.by_lp_mint.entry(pool.lp_mint).or_insert(index);
        }

        registry
    }

    pub fn pools(&self) -> &[LiquidityPoolInfo] {
        &self.pools
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    fn first(&self, indices: Option<&Vec<usize>>) -> Option<&LiquidityPoolInfo> {
        indices
            .and_then(|indices| indices.first())
            .map(|index| &self.pools[*index])
    }

    /// First pool trading `a` against `b`, in either orientation, optionally
    /// restricted to one pool version.
    pub fn pool_by_mints(
        &self,
        a: Pubkey,
        b: Pubkey,
        version: Option<u8>,
    ) -> Option<&LiquidityPoolInfo> {
        let pair = query_key(a, b);
        match version {
            Some(version) => self.first(self.by_pair_version.get(&(pair, version))),
            None => self.first(self.by_pair.get(&pair)),
        }
    }

    pub fn pool_by_lp_mint(&self, lp_mint: &Pubkey) -> Option<&LiquidityPoolInfo> {
        self.by_lp_mint.get(lp_mint).map(|index| &self.pools[*index])
    }

    /// First pool matching every provided criterion.
    ///
    /// `amm_or_market` must equal the pool's amm id or serum market, and each
    /// provided mint must be one of the pool's mints. A match needs either an
    /// id or both mints, and a request naming the same mint twice never
    /// matches.
    pub fn find_similar(
        &self,
        amm_or_market: Option<Pubkey>,
        from: Option<Pubkey>,
        to: Option<Pubkey>,
    ) -> Option<&LiquidityPoolInfo> {
        let from = from.map(normalize_mint);
        let to = to.map(normalize_mint);

        if let (Some(from), Some(to)) = (from, to) {
            if from == to {
                return None;
            }
        }

        match (amm_or_market, from, to) {
            (Some(id), from, to) => self
                .by_id
                .get(&id)?
                .iter()
                .map(|index| &self.pools[*index])
                .find(|pool| {
                    from.is_none_or(|mint| pool.holds(&mint))
                        && to.is_none_or(|mint| pool.holds(&mint))
                }),
            (None, Some(from), Some(to)) => self.first(self.by_pair.get(&pair_key(from, to))),
            _ => None,
        }
    }

    /// Every version-4 pool for the unordered pair, in list order.
    pub fn pools_for_pair(&self, from: Pubkey, to: Pubkey) -> Vec<&LiquidityPoolInfo> {
        self.by_pair_version
            .get(&(query_key(from, to), ROUTABLE_POOL_VERSION))
            .map(|indices| indices.iter().map(|index| &self.pools[*index]).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<LiquidityPoolInfo> for PoolRegistry {
    fn from_iter<T: IntoIterator<Item = LiquidityPoolInfo>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
