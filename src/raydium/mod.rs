pub mod pools;
pub mod state;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use solana_account::Account;
use solana_pubkey::Pubkey;

use crate::{
    account_caching::{AccountSource, KeyedAccount, fetch_many},
    layout::{EntityKind, LayoutId},
    pricing::{self, PoolState},
    raydium::state::AmmInfo,
    trading_venue::{
        FromAccount, QuoteRequest, QuoteResult, TradingVenue,
        error::TradingVenueError,
        protocol::PoolProtocol,
        token_info::{StaticTokenRegistry, TokenAccountInfo, TokenInfo, TokenRegistry},
    },
};

/// One liquidity pool of any supported generation.
///
/// Built from the pool account alone; `update_state()` must run before the
/// venue can price anything.
#[derive(Clone)]
pub struct LiquidityPoolVenue {
    pool: Pubkey,
    protocol: PoolProtocol,
    amm: AmmInfo,
    registry: Arc<dyn TokenRegistry>,
    state: Option<PoolState>,
    token_info: Vec<TokenInfo>,
}

impl FromAccount for LiquidityPoolVenue {
    /// The pool generation is detected from the account's data length.
    fn from_account(pubkey: &Pubkey, account: &Account) -> Result<Self, TradingVenueError> {
        let layout = LayoutId::detect(EntityKind::AmmInfo, account.data.len())
            .ok_or(TradingVenueError::FromAccountError(pubkey.into()))?;

        Self::new(pubkey, account, layout)
    }
}

impl LiquidityPoolVenue {
    pub fn new(
        pubkey: &Pubkey,
        account: &Account,
        layout: LayoutId,
    ) -> Result<Self, TradingVenueError> {
        let protocol = PoolProtocol::from_layout(layout).ok_or_else(|| {
            TradingVenueError::UnsupportedVenue(format!("{layout} is not a pool layout").into())
        })?;

        let amm = AmmInfo::decode(layout, &account.data).map_err(|e| {
            debug!("Pool {pubkey} does not decode as {layout}: {e}");
            TradingVenueError::FromAccountError(pubkey.into())
        })?;

        Ok(Self {
            pool: *pubkey,
            protocol,
            amm,
            registry: Arc::new(StaticTokenRegistry::new()),
            state: None,
            token_info: Vec::new(),
        })
    }

    /// Use `registry` to label the pool's tokens.
    pub fn with_registry(mut self, registry: Arc<dyn TokenRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn amm(&self) -> &AmmInfo {
        &self.amm
    }

    pub fn pool_state(&self) -> Option<&PoolState> {
        self.state.as_ref()
    }

    pub fn lp_mint(&self) -> Pubkey {
        self.amm.lp_mint
    }

    fn loaded_state(&self) -> Result<&PoolState, TradingVenueError> {
        self.state
            .as_ref()
            .ok_or(TradingVenueError::NotInitialized(self.pool.into()))
    }

    fn token(
        &self,
        slot: Option<KeyedAccount>,
        pubkey: Pubkey,
    ) -> Result<TokenInfo, TradingVenueError> {
        let keyed = slot.ok_or(TradingVenueError::NoAccountFound(pubkey.into()))?;
        TokenInfo::new(&pubkey, &keyed.account, self.registry.as_ref())
    }

    async fn refresh(
        &self,
        source: &dyn AccountSource,
    ) -> Result<(AmmInfo, PoolState, Vec<TokenInfo>), TradingVenueError> {
        let pubkeys = self.get_required_pubkeys_for_update()?;
        let accounts = fetch_many(source, &pubkeys).await?;

        let [pool, coin_vault, pc_vault, coin_mint, pc_mint]: [Option<KeyedAccount>; 5] = accounts
            .try_into()
            .map_err(|_| TradingVenueError::MissingState("pool refresh accounts".into()))?;

        let pool = pool.ok_or(TradingVenueError::NoAccountFound(self.pool.into()))?;
        let amm = AmmInfo::decode(self.amm.layout, &pool.account.data)?;

        if let Some(status) = amm.amm_status() {
            if !status.is_priceable() {
                return Err(TradingVenueError::InactivePoolError(self.pool, self.protocol));
            }
        }

        let coin_vault = decode_vault(coin_vault, amm.pool_coin_token_account)?;
        let pc_vault = decode_vault(pc_vault, amm.pool_pc_token_account)?;
        let state = PoolState::from_accounts(&amm, &coin_vault, &pc_vault)?;

        let token_info = vec![
            self.token(coin_mint, amm.coin_mint)?,
            self.token(pc_mint, amm.pc_mint)?,
        ];

        Ok((amm, state, token_info))
    }
}

fn decode_vault(
    slot: Option<KeyedAccount>,
    pubkey: Pubkey,
) -> Result<TokenAccountInfo, TradingVenueError> {
    let keyed = slot.ok_or(TradingVenueError::NoAccountFound(pubkey.into()))?;
    TokenAccountInfo::decode(&keyed.account.data)
        .map_err(|_| TradingVenueError::DeserializationFailed(pubkey.into()))
}

#[async_trait]
impl TradingVenue for LiquidityPoolVenue {
    fn initialized(&self) -> bool {
        self.state.is_some()
    }

    fn program_id(&self) -> Pubkey {
        self.protocol.program_id()
    }

    fn market_id(&self) -> Pubkey {
        self.pool
    }

    fn tradable_mints(&self) -> Result<Vec<Pubkey>, TradingVenueError> {
        Ok(vec![self.amm.coin_mint, self.amm.pc_mint])
    }

    fn get_token_info(&self) -> &[TokenInfo] {
        &self.token_info
    }

    fn protocol(&self) -> PoolProtocol {
        self.protocol
    }

    /// The pool itself, its two vaults and its two mints, in that order.
    fn get_required_pubkeys_for_update(&self) -> Result<Vec<Pubkey>, TradingVenueError> {
        Ok(vec![
            self.pool,
            self.amm.pool_coin_token_account,
            self.amm.pool_pc_token_account,
            self.amm.coin_mint,
            self.amm.pc_mint,
        ])
    }

    /// A failed refresh leaves the venue uninitialized until a refresh succeeds.
    async fn update_state(&mut self, source: &dyn AccountSource) -> Result<(), TradingVenueError> {
        let refreshed = self.refresh(source).await;
        match refreshed {
            Ok((amm, state, token_info)) => {
                debug!(
                    "{} pool {} refreshed: coin reserve {}, pc reserve {}",
                    self.protocol, self.pool, state.coin.balance, state.pc.balance
                );

                self.amm = amm;
                self.state = Some(state);
                self.token_info = token_info;
                Ok(())
            }
            Err(e) => {
                debug!("{} pool {} refresh failed: {e}", self.protocol, self.pool);

                self.state = None;
                self.token_info.clear();
                Err(e)
            }
        }
    }

    fn spot_price(&self, coin_base: bool) -> Result<Decimal, TradingVenueError> {
        pricing::spot_price(self.loaded_state()?, coin_base)
    }

    fn quote(&self, request: QuoteRequest) -> Result<QuoteResult, TradingVenueError> {
        let state = self.loaded_state()?;

        let expected_output = pricing::quote(
            state,
            request.amount,
            &request.input_mint,
            &request.output_mint,
            request.slippage_pct,
        )?;
        let routable = state.has_liquidity()
            && state
                .direction(&request.input_mint, &request.output_mint)
                .is_some();

        Ok(QuoteResult {
            input_mint: request.input_mint,
            output_mint: request.output_mint,
            amount: request.amount,
            expected_output,
            routable,
        })
    }
}
