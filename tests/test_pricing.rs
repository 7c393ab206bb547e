#[cfg(test)]
mod test_pricing {
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use solana_pubkey::Pubkey;

    use raydium_liquidity_reader::layout::{LayoutId, Record, Value};
    use raydium_liquidity_reader::pricing::{
        CurveKind, PoolState, PoolToken, StableParams, TokenAmount, amount::decimal_from_scaled,
        quote, quote_constant_product, quote_stable, spot_price,
    };
    use raydium_liquidity_reader::raydium::state::AmmInfo;
    use raydium_liquidity_reader::trading_venue::{
        error::TradingVenueError, token_info::TokenAccountInfo,
    };

    const COIN: Pubkey = Pubkey::new_from_array([1; 32]);
    const PC: Pubkey = Pubkey::new_from_array([2; 32]);
    const OTHER: Pubkey = Pubkey::new_from_array([3; 32]);

    fn init_test_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn constant_product(coin: u128, coin_decimals: u32, pc: u128, pc_decimals: u32) -> PoolState {
        PoolState::new(
            PoolToken::new(COIN, coin, coin_decimals),
            PoolToken::new(PC, pc, pc_decimals),
            CurveKind::ConstantProduct,
        )
    }

    fn stable(coin: u128, pc: u128, current_k: u128) -> PoolState {
        PoolState::new(
            PoolToken::new(COIN, coin, 6),
            PoolToken::new(PC, pc, 6),
            CurveKind::Stable(StableParams {
                current_k,
                amm_max_price: None,
                amm_middle_price: None,
            }),
        )
    }

    #[fixture]
    fn example_pool() -> PoolState {
        constant_product(1_000_000, 6, 2_000_000, 6)
    }

    /// 1000 whole tokens a side, k = 5,000,000 whole units.
    #[fixture]
    fn stable_pool() -> PoolState {
        stable(1_000_000_000, 1_000_000_000, 5_000_000 * 10u128.pow(12))
    }

    #[rstest]
    fn test_constant_product_example(example_pool: PoolState) {
        init_test_logger();

        assert_eq!(spot_price(&example_pool, true).unwrap(), dec!(2));
        assert_eq!(spot_price(&example_pool, false).unwrap(), dec!(0.5));

        let out = quote(&example_pool, dec!(100), &COIN, &PC, dec!(1)).unwrap();
        assert_eq!(out, TokenAmount::new(202_000_000, 6));
        assert_eq!(out.to_decimal().unwrap(), dec!(202));

        let back = quote(&example_pool, dec!(202), &PC, &COIN, Decimal::ZERO).unwrap();
        assert_eq!(back.to_decimal().unwrap(), dec!(101));
    }

    #[rstest]
    #[case(0, 2_000_000)]
    #[case(1_000_000, 0)]
    #[case(0, 0)]
    fn test_zero_reserve_prices_and_quotes_zero(#[case] coin: u128, #[case] pc: u128) {
        let pools = [
            constant_product(coin, 6, pc, 9),
            stable(coin, pc, 5_000_000 * 10u128.pow(12)),
        ];

        for pool in pools {
            for coin_base in [true, false] {
                assert_eq!(spot_price(&pool, coin_base).unwrap(), Decimal::ZERO);
            }

            let out = quote(&pool, dec!(10), &COIN, &PC, dec!(1)).unwrap();
            assert!(out.is_zero());
            assert_eq!(out.decimals, pool.pc.decimals());

            let out = quote(&pool, dec!(10), &PC, &COIN, dec!(1)).unwrap();
            assert!(out.is_zero());
            assert_eq!(out.decimals, pool.coin.decimals());
        }
    }

    #[rstest]
    #[case(dec!(10))]
    #[case(dec!(0.5))]
    #[case(dec!(12345.678))]
    fn test_constant_product_round_trip(#[case] amount: Decimal) {
        let pool = constant_product(3_000_000, 6, 7_000_000_000, 9);

        let out = quote_constant_product(&pool, amount, &COIN, &PC, Decimal::ZERO).unwrap();
        assert_eq!(out.decimals, 9);

        let back =
            quote_constant_product(&pool, out.to_decimal().unwrap(), &PC, &COIN, Decimal::ZERO)
                .unwrap();
        assert_eq!(back.decimals, 6);

        let diff = (back.to_decimal().unwrap() - amount).abs();
        assert!(diff <= dec!(0.00001), "round trip of {amount} drifted by {diff}");
    }

    #[test]
    fn test_constant_product_extreme_ratio() {
        // Spot price falls below the smallest representable decimal.
        let pool = constant_product(u64::MAX as u128, 0, 1, 9);
        assert_eq!(spot_price(&pool, true).unwrap(), dec!(0.0000000000000000000000000001));

        let out = quote(&pool, dec!(1), &PC, &COIN, Decimal::ZERO).unwrap();
        assert_eq!(out, TokenAmount::new(u64::MAX as u128 * 10u128.pow(9), 0));

        let out = quote(&pool, dec!(1000), &COIN, &PC, Decimal::ZERO).unwrap();
        assert!(out.is_zero());
        assert_eq!(out.decimals, 9);
    }

    #[rstest]
    fn test_unknown_pair_is_zero(example_pool: PoolState, stable_pool: PoolState) {
        for pool in [example_pool, stable_pool] {
            let out = quote(&pool, dec!(10), &COIN, &OTHER, dec!(1)).unwrap();
            assert_eq!(out, TokenAmount::zero(0));

            let out = quote(&pool, dec!(10), &OTHER, &PC, dec!(1)).unwrap();
            assert_eq!(out, TokenAmount::zero(6));

            let out = quote(&pool, dec!(10), &COIN, &COIN, dec!(1)).unwrap();
            assert!(out.is_zero());
        }
    }

    #[rstest]
    fn test_zero_input_quotes_zero(example_pool: PoolState, stable_pool: PoolState) {
        for pool in [example_pool, stable_pool] {
            let out = quote(&pool, Decimal::ZERO, &COIN, &PC, dec!(1)).unwrap();
            assert!(out.is_zero());
        }
    }

    #[rstest]
    fn test_stable_spot_price(stable_pool: PoolState) {
        // sqrt(9 * 1000^2 / (10 * 1000^2 - 5,000,000)) = sqrt(1.8)
        let price = spot_price(&stable_pool, true).unwrap();
        assert!((price - dec!(1.3416407864998738)).abs() < dec!(0.000000001));

        let inverse = spot_price(&stable_pool, false).unwrap();
        assert!((price * inverse - Decimal::ONE).abs() < dec!(0.000000001));
    }

    #[rstest]
    fn test_stable_slippage_divides(stable_pool: PoolState) {
        let price = spot_price(&stable_pool, true).unwrap();

        let unslipped = quote_stable(&stable_pool, dec!(10), &COIN, &PC, Decimal::ZERO).unwrap();
        assert_eq!(unslipped, TokenAmount::from_decimal(dec!(10) * price, 6).unwrap());

        let slipped = quote_stable(&stable_pool, dec!(10), &COIN, &PC, dec!(1)).unwrap();
        assert!(slipped.amount > unslipped.amount);
        assert_eq!(
            slipped,
            TokenAmount::from_decimal(dec!(10) * price / dec!(0.99), 6).unwrap()
        );

        let reverse = quote_stable(&stable_pool, dec!(10), &PC, &COIN, dec!(1)).unwrap();
        assert_eq!(
            reverse,
            TokenAmount::from_decimal(dec!(10) / price / dec!(0.99), 6).unwrap()
        );
    }

    #[rstest]
    fn test_constant_product_slippage_multiplies(example_pool: PoolState) {
        let unslipped = quote(&example_pool, dec!(10), &COIN, &PC, Decimal::ZERO).unwrap();
        let slipped = quote(&example_pool, dec!(10), &COIN, &PC, dec!(5)).unwrap();

        assert_eq!(unslipped.to_decimal().unwrap(), dec!(20));
        assert_eq!(slipped.to_decimal().unwrap(), dec!(21));
    }

    #[rstest]
    fn test_stable_full_slippage_is_math_error(stable_pool: PoolState) {
        let result = quote(&stable_pool, dec!(10), &COIN, &PC, dec!(100));
        assert!(matches!(result, Err(TradingVenueError::MathError(_))));
    }

    #[test]
    fn test_stable_invariant_out_of_range_is_math_error() {
        // n * y^2 == k
        let pool = stable(1_000_000_000, 1_000_000_000, 10_000_000 * 10u128.pow(12));
        assert!(matches!(
            spot_price(&pool, true),
            Err(TradingVenueError::MathError(_))
        ));
        assert!(matches!(
            quote(&pool, dec!(1), &COIN, &PC, Decimal::ZERO),
            Err(TradingVenueError::MathError(_))
        ));
    }

    #[test]
    fn test_stable_quote_on_constant_product_pool() {
        let pool = constant_product(1_000_000, 6, 2_000_000, 6);
        assert!(matches!(
            quote_stable(&pool, dec!(1), &COIN, &PC, Decimal::ZERO),
            Err(TradingVenueError::UnsupportedVenue(_))
        ));
    }

    #[test]
    fn test_token_amount_conversions() {
        assert_eq!(
            TokenAmount::from_decimal(dec!(1.23456789), 6).unwrap(),
            TokenAmount::new(1_234_567, 6)
        );
        assert_eq!(TokenAmount::new(1_500, 3).to_decimal().unwrap(), dec!(1.5));
        assert_eq!(TokenAmount::new(1_500, 3).to_string(), "1.500");
        assert!(TokenAmount::from_decimal(dec!(-1), 6).is_err());

        // Wider than a Decimal mantissa: low digits are dropped.
        assert!(decimal_from_scaled(u128::MAX, 0).is_err());
        let value = decimal_from_scaled(u128::MAX, 10).unwrap();
        assert!(value > Decimal::from(u64::MAX));
        let value = decimal_from_scaled(u128::MAX, 38).unwrap();
        assert!((value - dec!(3.4028236692093846346)).abs() < dec!(0.0000001));
    }

    fn amm_with_vaults(coin_mint: Pubkey, pc_mint: Pubkey) -> AmmInfo {
        let record = Record::zeroed(LayoutId::AmmV4)
            .with("status", Value::U64(6))
            .and_then(|r| r.with("coin_decimals", Value::U64(9)))
            .and_then(|r| r.with("pc_decimals", Value::U64(6)))
            .and_then(|r| r.with("need_take_pnl_coin", Value::U64(1_000_000_000)))
            .and_then(|r| r.with("need_take_pnl_pc", Value::U64(500)))
            .and_then(|r| r.with("coin_mint_address", Value::PublicKey(coin_mint)))
            .and_then(|r| r.with("pc_mint_address", Value::PublicKey(pc_mint)))
            .unwrap();
        AmmInfo::from_record(&record).unwrap()
    }

    fn vault(mint: Pubkey, amount: u64) -> TokenAccountInfo {
        TokenAccountInfo {
            mint,
            owner: Pubkey::new_unique(),
            amount,
        }
    }

    #[test]
    fn test_pool_state_from_accounts() {
        let amm = amm_with_vaults(COIN, PC);

        let state =
            PoolState::from_accounts(&amm, &vault(COIN, 3_000_000_000), &vault(PC, 100)).unwrap();
        assert_eq!(state.coin.balance, TokenAmount::new(2_000_000_000, 9));
        // Owed pnl above the vault balance saturates at zero.
        assert_eq!(state.pc.balance, TokenAmount::new(0, 6));
        assert_eq!(state.curve, CurveKind::ConstantProduct);
        assert!(!state.has_liquidity());

        assert!(matches!(
            PoolState::from_accounts(&amm, &vault(OTHER, 1), &vault(PC, 1)),
            Err(TradingVenueError::InvalidMint(_))
        ));
        assert!(matches!(
            PoolState::from_accounts(&amm, &vault(COIN, 1), &vault(COIN, 1)),
            Err(TradingVenueError::InvalidMint(_))
        ));
    }
}
