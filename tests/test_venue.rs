#[cfg(test)]
mod test_venue {
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use solana_account::Account;
    use solana_client::nonblocking::rpc_client::RpcClient;
    use solana_pubkey::Pubkey;

    use raydium_liquidity_reader::account_caching::{
        AccountCacheError, AccountSource, BatchFetcher, rpc_source::RpcAccountSource,
    };
    use raydium_liquidity_reader::config::{
        DEFAULT_SNAPSHOT_URL, LIQUIDITY_POOL_PROGRAM_ID_V4, NATIVE_SOL_MINT, SourceConfig,
        TOKEN_PROGRAM_ID, WSOL_MINT,
    };
    use raydium_liquidity_reader::layout::{LayoutId, Record, Value, decode_with, encode};
    use raydium_liquidity_reader::pricing::TokenAmount;
    use raydium_liquidity_reader::raydium::{
        LiquidityPoolVenue,
        pools::{LiquidityPoolInfo, PoolRegistry},
    };
    use raydium_liquidity_reader::trading_venue::{
        FromAccount, QuoteRequest, TradingVenue,
        error::TradingVenueError,
        protocol::PoolProtocol,
        token_info::{
            StaticTokenRegistry, TokenRegistry, lp_mint_decimals, lp_mint_info, mint_decimals,
        },
    };

    const RPC_URL: &str = "https://api.mainnet-beta.solana.com";

    const COIN: Pubkey = Pubkey::new_from_array([1; 32]);
    const PC: Pubkey = Pubkey::new_from_array([2; 32]);
    const OTHER: Pubkey = Pubkey::new_from_array([3; 32]);
    const USDC: Pubkey = Pubkey::from_str_const("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

    fn init_test_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Default)]
    struct MapSource {
        accounts: HashMap<Pubkey, Account>,
        requested: Mutex<Vec<Pubkey>>,
    }

    impl MapSource {
        fn insert(&mut self, pubkey: Pubkey, data: Vec<u8>) {
            self.accounts.insert(
                pubkey,
                Account {
                    lamports: 1,
                    data,
                    owner: TOKEN_PROGRAM_ID,
                    executable: false,
                    rent_epoch: 0,
                },
            );
        }

        fn requested(&self) -> Vec<Pubkey> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AccountSource for MapSource {
        async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, AccountCacheError> {
            self.requested.lock().unwrap().push(*pubkey);
            Ok(self.accounts.get(pubkey).cloned())
        }

        async fn get_accounts(
            &self,
            pubkeys: &[Pubkey],
        ) -> Result<Vec<Option<Account>>, AccountCacheError> {
            self.requested.lock().unwrap().extend_from_slice(pubkeys);
            Ok(pubkeys.iter().map(|p| self.accounts.get(p).cloned()).collect())
        }
    }

    fn mint_data(decimals: u8) -> Vec<u8> {
        let record = Record::zeroed(LayoutId::Mint)
            .with("decimals", Value::U8(decimals))
            .and_then(|r| r.with("is_initialized", Value::U8(1)))
            .unwrap();
        encode(&record).unwrap()
    }

    fn vault_data(mint: Pubkey, amount: u64) -> Vec<u8> {
        let record = Record::zeroed(LayoutId::TokenAccount)
            .with("mint", Value::PublicKey(mint))
            .and_then(|r| r.with("amount", Value::U64(amount)))
            .and_then(|r| r.with("state", Value::U8(1)))
            .unwrap();
        encode(&record).unwrap()
    }

    struct PoolFixture {
        pool: Pubkey,
        account: Account,
        coin_vault: Pubkey,
        pc_vault: Pubkey,
        source: MapSource,
    }

    fn pool_fixture(layout: LayoutId, status: u64) -> PoolFixture {
        let pool = Pubkey::new_unique();
        let coin_vault = Pubkey::new_unique();
        let pc_vault = Pubkey::new_unique();

        let mut record = Record::zeroed(layout)
            .with("status", Value::U64(status))
            .and_then(|r| r.with("coin_decimals", Value::U64(6)))
            .and_then(|r| r.with("pc_decimals", Value::U64(6)))
            .and_then(|r| r.with("need_take_pnl_coin", Value::U64(250_000)))
            .and_then(|r| r.with("pool_coin_token_account", Value::PublicKey(coin_vault)))
            .and_then(|r| r.with("pool_pc_token_account", Value::PublicKey(pc_vault)))
            .and_then(|r| r.with("coin_mint_address", Value::PublicKey(COIN)))
            .and_then(|r| r.with("pc_mint_address", Value::PublicKey(PC)))
            .unwrap();
        if layout == LayoutId::AmmStable {
            // k = 5 whole units at 6 decimals
            record = record
                .with("current_k", Value::U128(5 * 10u128.pow(12)))
                .unwrap();
        }
        let data = encode(&record).unwrap();

        let mut source = MapSource::default();
        source.insert(pool, data.clone());
        source.insert(coin_vault, vault_data(COIN, 1_250_000));
        source.insert(pc_vault, vault_data(PC, 2_000_000));
        source.insert(COIN, mint_data(6));
        source.insert(PC, mint_data(6));

        PoolFixture {
            pool,
            account: Account {
                lamports: 1,
                data,
                owner: LIQUIDITY_POOL_PROGRAM_ID_V4,
                executable: false,
                rent_epoch: 0,
            },
            coin_vault,
            pc_vault,
            source,
        }
    }

    fn request(
        input_mint: Pubkey,
        output_mint: Pubkey,
        amount: Decimal,
        slippage_pct: Decimal,
    ) -> QuoteRequest {
        QuoteRequest {
            input_mint,
            output_mint,
            amount,
            slippage_pct,
        }
    }

    #[tokio::test]
    async fn test_venue_refresh_and_quote() {
        init_test_logger();

        let fixture = pool_fixture(LayoutId::AmmV4, 6);
        let registry = Arc::new(StaticTokenRegistry::new().with_token(COIN, "RAY", 6));

        let mut venue = LiquidityPoolVenue::from_account(&fixture.pool, &fixture.account)
            .unwrap()
            .with_registry(registry);

        assert_eq!(venue.protocol(), PoolProtocol::RaydiumV4);
        assert_eq!(venue.label(), "Raydium AMM V4");
        assert_eq!(venue.program_id(), LIQUIDITY_POOL_PROGRAM_ID_V4);
        assert_eq!(venue.market_id(), fixture.pool);
        assert_eq!(venue.tradable_mints().unwrap(), vec![COIN, PC]);
        assert_eq!(
            venue.get_required_pubkeys_for_update().unwrap(),
            vec![fixture.pool, fixture.coin_vault, fixture.pc_vault, COIN, PC]
        );

        assert!(!venue.initialized());
        assert!(matches!(
            venue.quote(request(COIN, PC, dec!(1), Decimal::ZERO)),
            Err(TradingVenueError::NotInitialized(_))
        ));

        venue.update_state(&fixture.source).await.unwrap();
        assert!(venue.initialized());

        // 1,250,000 in the vault less 250,000 owed pnl.
        let state = venue.pool_state().unwrap();
        assert_eq!(state.coin.balance, TokenAmount::new(1_000_000, 6));
        assert_eq!(state.pc.balance, TokenAmount::new(2_000_000, 6));

        let tokens = venue.get_token_info();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].symbol, "RAY");
        assert_eq!(tokens[1].symbol, "unknown");
        assert_eq!(venue.decimals().unwrap(), vec![6, 6]);
        assert_eq!(venue.get_token(1).unwrap().pubkey, PC);
        assert!(venue.get_token(2).is_err());

        assert_eq!(venue.spot_price(true).unwrap(), dec!(2));

        let result = venue.quote(request(COIN, PC, dec!(100), dec!(1))).unwrap();
        assert!(result.routable);
        assert_eq!(result.expected_output, TokenAmount::new(202_000_000, 6));
        assert_eq!(result.amount, dec!(100));

        let result = venue.quote(request(COIN, OTHER, dec!(100), dec!(1))).unwrap();
        assert!(!result.routable);
        assert!(result.expected_output.is_zero());

        let result = venue.quote(request(PC, COIN, Decimal::ZERO, dec!(1))).unwrap();
        assert!(result.routable);
        assert!(result.expected_output.is_zero());
    }

    #[tokio::test]
    async fn test_stable_venue() {
        let fixture = pool_fixture(LayoutId::AmmStable, 1);
        let mut venue = LiquidityPoolVenue::from_account(&fixture.pool, &fixture.account).unwrap();

        assert_eq!(venue.protocol(), PoolProtocol::RaydiumStable);
        assert_eq!(venue.label(), "Raydium Stable");
        assert!(venue.amm().stable.is_some());

        venue.update_state(&fixture.source).await.unwrap();

        let unslipped = venue.quote(request(COIN, PC, dec!(10), Decimal::ZERO)).unwrap();
        let slipped = venue.quote(request(COIN, PC, dec!(10), dec!(2))).unwrap();
        assert!(slipped.expected_output.amount > unslipped.expected_output.amount);

        assert!(matches!(
            venue.quote(request(COIN, PC, dec!(10), dec!(100))),
            Err(TradingVenueError::MathError(_))
        ));
    }

    fn assert_unquotable(venue: &LiquidityPoolVenue) {
        assert!(!venue.initialized());
        assert!(venue.get_token_info().is_empty());
        assert!(matches!(
            venue.quote(request(COIN, PC, dec!(1), Decimal::ZERO)),
            Err(TradingVenueError::NotInitialized(_))
        ));
        assert!(matches!(
            venue.spot_price(true),
            Err(TradingVenueError::NotInitialized(_))
        ));
    }

    fn with_status(data: &[u8], status: u64) -> Vec<u8> {
        let record = decode_with(LayoutId::AmmV4, data)
            .and_then(|r| r.with("status", Value::U64(status)))
            .unwrap();
        encode(&record).unwrap()
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[tokio::test]
    async fn test_inactive_pool(#[case] status: u64) {
        let mut fixture = pool_fixture(LayoutId::AmmV4, 6);
        let mut venue =
            LiquidityPoolVenue::new(&fixture.pool, &fixture.account, LayoutId::AmmV4).unwrap();

        venue.update_state(&fixture.source).await.unwrap();
        assert!(venue.quote(request(COIN, PC, dec!(1), Decimal::ZERO)).unwrap().routable);

        let data = with_status(&fixture.account.data, status);
        fixture.source.insert(fixture.pool, data);

        let result = venue.update_state(&fixture.source).await;
        assert!(matches!(
            result,
            Err(TradingVenueError::InactivePoolError(pool, PoolProtocol::RaydiumV4))
                if pool == fixture.pool
        ));
        assert_unquotable(&venue);

        // Reactivated pools quote again.
        let data = with_status(&fixture.account.data, 6);
        fixture.source.insert(fixture.pool, data);
        venue.update_state(&fixture.source).await.unwrap();
        assert!(venue.initialized());
    }

    #[tokio::test]
    async fn test_missing_vault() {
        let mut fixture = pool_fixture(LayoutId::AmmV4, 6);

        let mut venue = LiquidityPoolVenue::from_account(&fixture.pool, &fixture.account).unwrap();
        venue.update_state(&fixture.source).await.unwrap();
        assert!(venue.initialized());

        fixture.source.accounts.remove(&fixture.pc_vault);
        let result = venue.update_state(&fixture.source).await;
        assert!(matches!(result, Err(TradingVenueError::NoAccountFound(_))));
        assert_unquotable(&venue);
    }

    #[test]
    fn test_construction_errors() {
        let fixture = pool_fixture(LayoutId::AmmV4, 6);

        let truncated = Account {
            data: fixture.account.data[..100].to_vec(),
            ..fixture.account.clone()
        };
        assert!(matches!(
            LiquidityPoolVenue::from_account(&fixture.pool, &truncated),
            Err(TradingVenueError::FromAccountError(_))
        ));

        assert!(matches!(
            LiquidityPoolVenue::new(&fixture.pool, &fixture.account, LayoutId::AmmV3),
            Err(TradingVenueError::FromAccountError(_))
        ));

        assert!(matches!(
            LiquidityPoolVenue::new(&fixture.pool, &fixture.account, LayoutId::Mint),
            Err(TradingVenueError::UnsupportedVenue(_))
        ));
    }

    fn pool_info(version: u8, coin_mint: Pubkey, pc_mint: Pubkey) -> LiquidityPoolInfo {
        LiquidityPoolInfo {
            name: format!("pool v{version}"),
            amm_id: Pubkey::new_unique(),
            serum_market: Pubkey::new_unique(),
            coin_mint,
            pc_mint,
            lp_mint: Pubkey::new_unique(),
            version,
        }
    }

    #[fixture]
    fn registry() -> PoolRegistry {
        [
            pool_info(4, COIN, PC),
            pool_info(4, PC, COIN),
            pool_info(5, COIN, PC),
            pool_info(4, NATIVE_SOL_MINT, USDC),
            pool_info(2, COIN, OTHER),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn test_pool_by_mints(registry: PoolRegistry) {
        let pools = registry.pools();

        assert_eq!(registry.pool_by_mints(PC, COIN, None), Some(&pools[0]));
        assert_eq!(registry.pool_by_mints(COIN, PC, Some(5)), Some(&pools[2]));
        assert_eq!(registry.pool_by_mints(COIN, PC, Some(3)), None);
        assert_eq!(registry.pool_by_mints(USDC, WSOL_MINT, Some(4)), Some(&pools[3]));
        assert_eq!(registry.pool_by_mints(PC, OTHER, None), None);

        assert_eq!(registry.pool_by_lp_mint(&pools[4].lp_mint), Some(&pools[4]));
        assert_eq!(registry.pool_by_lp_mint(&COIN), None);

        assert_eq!(pools[2].layout(), Some(LayoutId::AmmStable));
        assert_eq!(pools[4].layout(), Some(LayoutId::AmmLegacy));
    }

    #[rstest]
    fn test_pools_for_pair(registry: PoolRegistry) {
        let pools = registry.pools();

        assert_eq!(registry.pools_for_pair(PC, COIN), vec![&pools[0], &pools[1]]);
        assert_eq!(registry.pools_for_pair(WSOL_MINT, USDC), vec![&pools[3]]);
        assert!(registry.pools_for_pair(COIN, OTHER).is_empty());
    }

    #[rstest]
    fn test_find_similar(registry: PoolRegistry) {
        let pools = registry.pools();
        let second = &pools[1];

        assert_eq!(registry.find_similar(None, Some(PC), Some(COIN)), Some(&pools[0]));
        assert_eq!(registry.find_similar(None, Some(WSOL_MINT), Some(USDC)), Some(&pools[3]));
        assert_eq!(registry.find_similar(Some(second.amm_id), None, None), Some(second));
        assert_eq!(
            registry.find_similar(Some(second.serum_market), Some(COIN), None),
            Some(second)
        );
        assert_eq!(registry.find_similar(Some(second.amm_id), Some(OTHER), None), None);
        assert_eq!(registry.find_similar(Some(OTHER), None, None), None);

        // Neither an id nor both mints.
        assert_eq!(registry.find_similar(None, Some(COIN), None), None);
        assert_eq!(registry.find_similar(None, None, None), None);

        // The same mint twice never matches.
        assert_eq!(registry.find_similar(None, Some(COIN), Some(COIN)), None);
        assert_eq!(
            registry.find_similar(Some(second.amm_id), Some(COIN), Some(COIN)),
            None
        );
        assert_eq!(
            registry.find_similar(None, Some(WSOL_MINT), Some(NATIVE_SOL_MINT)),
            None
        );
    }

    #[test]
    fn test_wrapped_sol_listing_is_not_normalised() {
        let listed_wrapped = pool_info(4, WSOL_MINT, USDC);
        let listed_native = pool_info(4, USDC, NATIVE_SOL_MINT);
        let registry = PoolRegistry::new(vec![listed_wrapped.clone(), listed_native.clone()]);

        // Queries name either mint; only the native listing matches.
        for sol in [WSOL_MINT, NATIVE_SOL_MINT] {
            assert_eq!(registry.find_similar(None, Some(sol), Some(USDC)), Some(&listed_native));
            assert_eq!(registry.pool_by_mints(USDC, sol, None), Some(&listed_native));
            assert_eq!(registry.pools_for_pair(sol, USDC), vec![&listed_native]);
        }

        assert_eq!(
            registry.find_similar(Some(listed_wrapped.amm_id), Some(WSOL_MINT), None),
            None
        );
        assert_eq!(
            registry.find_similar(Some(listed_wrapped.amm_id), Some(USDC), None),
            Some(&listed_wrapped)
        );
    }

    #[tokio::test]
    async fn test_mint_helpers() {
        init_test_logger();

        let known = Pubkey::new_unique();
        let on_chain = Pubkey::new_unique();
        let absent = Pubkey::new_unique();

        let mut source = MapSource::default();
        source.insert(on_chain, mint_data(9));
        let registry = StaticTokenRegistry::new().with_token(known, "RAY-USDC", 6);

        assert_eq!(mint_decimals(&source, &on_chain).await.unwrap(), 9);
        assert!(matches!(
            mint_decimals(&source, &absent).await,
            Err(TradingVenueError::NoAccountFound(_))
        ));

        let source = MapSource {
            accounts: source.accounts,
            ..Default::default()
        };
        let decimals = lp_mint_decimals(&source, &registry, &[known, on_chain, absent])
            .await
            .unwrap();
        assert_eq!(decimals.len(), 2);
        assert_eq!(decimals.get(&known), Some(&6));
        assert_eq!(decimals.get(&on_chain), Some(&9));
        assert_eq!(source.requested(), vec![on_chain, absent]);

        let info = lp_mint_info(&source, &registry, &on_chain).await.unwrap();
        assert_eq!((info.symbol.as_str(), info.decimals), ("unknown", 9));
        let info = lp_mint_info(&source, &registry, &known).await.unwrap();
        assert_eq!((info.symbol.as_str(), info.decimals), ("RAY-USDC", 6));

        assert_eq!(registry.label(&known), "RAY-USDC");
        assert_eq!(registry.label(&absent), "unknown");
    }

    #[test]
    fn test_source_config() {
        let config =
            SourceConfig::from_json(r#"{"rpc_url":"http://localhost:8899","chunk_size":250}"#)
                .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(config.snapshot_url, DEFAULT_SNAPSHOT_URL);
        assert_eq!(BatchFetcher::from_config(&config).chunk_size(), 100);

        assert_eq!(SourceConfig::from_json("{}").unwrap(), SourceConfig::default());
        assert!(SourceConfig::from_json("chunk_size = 10").is_err());
    }

    #[rstest]
    #[tokio::test]
    #[ignore = "reads mainnet over RPC"]
    #[case("58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2")]
    async fn test_live_pool(#[case] amm_key: &str) {
        init_test_logger();

        let amm_key = Pubkey::from_str(amm_key).expect("Invalid test pubkey");
        let rpc = RpcClient::new(RPC_URL.to_string());
        let pool_account = rpc
            .get_account(&amm_key)
            .await
            .expect("Failed to fetch pool account");

        let mut venue = LiquidityPoolVenue::from_account(&amm_key, &pool_account)
            .expect("Failed to construct venue from account");
        let source = RpcAccountSource::new(rpc);
        venue
            .update_state(&source)
            .await
            .expect("Venue state update failed");

        let tokens = venue.get_token_info().to_vec();
        assert_eq!(tokens.len(), 2);
        assert!(venue.spot_price(true).unwrap() > Decimal::ZERO);

        for (input, output) in [(0, 1), (1, 0)] {
            let result = venue
                .quote(request(tokens[input].pubkey, tokens[output].pubkey, dec!(1), dec!(1)))
                .unwrap();
            assert!(result.routable);
            assert!(!result.expected_output.is_zero());
        }
    }
}
