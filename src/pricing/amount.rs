use std::fmt::Display;

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::trading_venue::error::TradingVenueError;

/// Largest scale a `Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Largest mantissa a `Decimal` can carry (96 bits).
const MAX_DECIMAL_MANTISSA: u128 = (1u128 << 96) - 1;

/// Builds `value / 10^scale` as a `Decimal` without going through floats.
///
/// Values beyond the 96-bit mantissa or 28-digit scale drop their least
/// significant digits until they fit.
pub fn decimal_from_scaled(value: u128, scale: u32) -> Result<Decimal, TradingVenueError> {
    let mut value = value;
    let mut scale = scale;
    while value > MAX_DECIMAL_MANTISSA || scale > MAX_DECIMAL_SCALE {
        if scale == 0 {
            return Err(TradingVenueError::MathError(
                format!("{value} exceeds the decimal range").into(),
            ));
        }
        value /= 10;
        scale -= 1;
    }

    Decimal::try_from_i128_with_scale(value as i128, scale)
        .map_err(|e| TradingVenueError::DataConversionError(e.to_string().into()))
}

/// `10^exponent` as a `Decimal`.
pub fn pow10(exponent: u32) -> Result<Decimal, TradingVenueError> {
    (0..exponent).try_fold(Decimal::ONE, |acc, _| {
        acc.checked_mul(Decimal::TEN)
            .ok_or(TradingVenueError::MathError("power of ten overflow".into()))
    })
}

/// An exact token quantity: an integer count of the smallest unit plus the
/// mint's decimals. The human value is `amount / 10^decimals`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenAmount {
    pub amount: u128,
    pub decimals: u32,
}

impl TokenAmount {
    pub fn new(amount: u128, decimals: u32) -> Self {
        Self { amount, decimals }
    }

    pub fn zero(decimals: u32) -> Self {
        Self::new(0, decimals)
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// The amount in whole tokens.
    pub fn to_decimal(&self) -> Result<Decimal, TradingVenueError> {
        decimal_from_scaled(self.amount, self.decimals)
    }

    /// Converts a whole-token value to smallest units, truncating anything
    /// below one unit.
    pub fn from_decimal(value: Decimal, decimals: u32) -> Result<Self, TradingVenueError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TradingVenueError::DataConversionError(
                format!("negative token amount {value}").into(),
            ));
        }

        let units = value
            .checked_mul(pow10(decimals)?)
            .ok_or(TradingVenueError::MathError("token amount overflow".into()))?
            .trunc();
        let amount = units.to_u128().ok_or(TradingVenueError::DataConversionError(
            format!("{units} does not fit in u128").into(),
        ))?;

        Ok(Self::new(amount, decimals))
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_decimal() {
            Ok(value) => write!(f, "{}", value),
            Err(_) => write!(f, "{}e-{}", self.amount, self.decimals),
        }
    }
}
