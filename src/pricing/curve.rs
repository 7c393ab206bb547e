use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use solana_pubkey::Pubkey;

use crate::{
    pricing::{
        CurveKind, PoolState, StableParams, SwapDirection, TokenAmount, amount::decimal_from_scaled,
    },
    trading_venue::error::TradingVenueError,
};

/// Amplification constant `n` of the stable curve family.
pub const STABLE_AMPLIFIER: Decimal = dec!(10);

const ONE_HUNDRED: Decimal = dec!(100);

fn math_error(message: &'static str) -> TradingVenueError {
    TradingVenueError::MathError(message.into())
}

/// Price of one side in units of the other.
///
/// With `coin_base` the result is pc per coin, otherwise coin per pc. A pool
/// with either reserve at zero has no liquidity and is priced at zero.
pub fn spot_price(pool: &PoolState, coin_base: bool) -> Result<Decimal, TradingVenueError> {
    if !pool.has_liquidity() {
        return Ok(Decimal::ZERO);
    }

    match &pool.curve {
        CurveKind::ConstantProduct => constant_product_price(pool, coin_base),
        CurveKind::Stable(params) => stable_price(pool, params, coin_base),
    }
}

fn constant_product_price(pool: &PoolState, coin_base: bool) -> Result<Decimal, TradingVenueError> {
    let coin = pool.coin.balance.to_decimal()?;
    let pc = pool.pc.balance.to_decimal()?;

    let (numerator, denominator) = if coin_base { (pc, coin) } else { (coin, pc) };
    numerator
        .checked_div(denominator)
        .ok_or(math_error("reserve ratio overflow"))
}

/// Marginal price of the stable invariant:
/// `sqrt((n - 1) * y^2 / (n * y^2 - k))`, with `y` the coin reserve in whole
/// tokens and `k` the invariant in whole-token units.
fn stable_price(
    pool: &PoolState,
    params: &StableParams,
    coin_base: bool,
) -> Result<Decimal, TradingVenueError> {
    let system_decimals = pool.coin.decimals().max(pool.pc.decimals());
    let k = decimal_from_scaled(params.current_k, 2 * system_decimals)?;
    let y = pool.coin.balance.to_decimal()?;

    let y_squared = y.checked_mul(y).ok_or(math_error("stable reserve overflow"))?;
    let numerator = (STABLE_AMPLIFIER - Decimal::ONE)
        .checked_mul(y_squared)
        .ok_or(math_error("stable numerator overflow"))?;
    let denominator = STABLE_AMPLIFIER
        .checked_mul(y_squared)
        .and_then(|v| v.checked_sub(k))
        .ok_or(math_error("stable denominator overflow"))?;

    if denominator <= Decimal::ZERO {
        return Err(math_error("stable curve radicand is not positive"));
    }

    let price = numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.sqrt())
        .ok_or(math_error("stable price is not representable"))?;

    if coin_base {
        Ok(price)
    } else {
        Decimal::ONE
            .checked_div(price)
            .ok_or(math_error("stable price inversion"))
    }
}

/// Output amount for swapping `amount_in` whole tokens of `from` into `to`.
///
/// Dispatches on the pool's curve. An unknown mint pair or an empty pool is
/// unroutable and quotes zero.
pub fn quote(
    pool: &PoolState,
    amount_in: Decimal,
    from: &Pubkey,
    to: &Pubkey,
    slippage_pct: Decimal,
) -> Result<TokenAmount, TradingVenueError> {
    match pool.curve {
        CurveKind::ConstantProduct => {
            quote_constant_product(pool, amount_in, from, to, slippage_pct)
        }
        CurveKind::Stable(_) => quote_stable(pool, amount_in, from, to, slippage_pct),
    }
}

fn unroutable(pool: &PoolState, to: &Pubkey) -> TokenAmount {
    TokenAmount::zero(pool.decimals_of(to).unwrap_or_default())
}

/// `value * numerator / denominator`, dividing first only when the product
/// overflows.
fn mul_div(value: Decimal, numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    value
        .checked_mul(numerator)
        .and_then(|v| v.checked_div(denominator))
        .or_else(|| {
            value
                .checked_div(denominator)
                .and_then(|v| v.checked_mul(numerator))
        })
}

/// Constant-product quote: `amount_in * pc / coin` (or `* coin / pc` from the
/// pc side), scaled by `(100 + slippage_pct) / 100`.
pub fn quote_constant_product(
    pool: &PoolState,
    amount_in: Decimal,
    from: &Pubkey,
    to: &Pubkey,
    slippage_pct: Decimal,
) -> Result<TokenAmount, TradingVenueError> {
    let Some(direction) = pool.direction(from, to) else {
        return Ok(unroutable(pool, to));
    };
    if !pool.has_liquidity() {
        return Ok(unroutable(pool, to));
    }

    let coin = pool.coin.balance.to_decimal()?;
    let pc = pool.pc.balance.to_decimal()?;
    let percent = (ONE_HUNDRED + slippage_pct)
        .checked_div(ONE_HUNDRED)
        .ok_or(math_error("slippage overflow"))?;

    // Scaled straight from the reserves; a rounded spot price loses digits
    // once the ratio nears the decimal scale limit.
    let (amount_out, decimals) = match direction {
        SwapDirection::Coin2PC => (mul_div(amount_in, pc, coin), pool.pc.decimals()),
        SwapDirection::PC2Coin => (mul_div(amount_in, coin, pc), pool.coin.decimals()),
    };
    let amount_out = amount_out
        .and_then(|v| v.checked_mul(percent))
        .ok_or(math_error("constant product quote overflow"))?;

    TokenAmount::from_decimal(amount_out, decimals)
}

/// Stable-curve quote: `amount_in * price` (or `/ price` from the pc side),
/// divided by `1 - slippage_pct / 100`.
pub fn quote_stable(
    pool: &PoolState,
    amount_in: Decimal,
    from: &Pubkey,
    to: &Pubkey,
    slippage_pct: Decimal,
) -> Result<TokenAmount, TradingVenueError> {
    let Some(direction) = pool.direction(from, to) else {
        return Ok(unroutable(pool, to));
    };
    if !pool.has_liquidity() {
        return Ok(unroutable(pool, to));
    }

    let CurveKind::Stable(params) = &pool.curve else {
        return Err(TradingVenueError::UnsupportedVenue(
            "stable quote on a constant-product pool".into(),
        ));
    };
    let price = stable_price(pool, params, true)?;

    let (amount_out, decimals) = match direction {
        SwapDirection::Coin2PC => (amount_in.checked_mul(price), pool.pc.decimals()),
        SwapDirection::PC2Coin => (amount_in.checked_div(price), pool.coin.decimals()),
    };
    let amount_out = amount_out.ok_or(math_error("stable quote overflow"))?;

    let keep = Decimal::ONE
        .checked_sub(slippage_pct / ONE_HUNDRED)
        .ok_or(math_error("slippage overflow"))?;
    if keep.is_zero() {
        return Err(math_error("slippage of 100% divides by zero"));
    }
    let amount_out = amount_out
        .checked_div(keep)
        .ok_or(math_error("stable slippage overflow"))?;

    TokenAmount::from_decimal(amount_out, decimals)
}
