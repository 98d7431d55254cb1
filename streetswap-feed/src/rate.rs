use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use streetswap_eth::TokenAmount;

/// Number of implied fractional digits in an integer-scaled rate.
///
/// The oracle contract returns rates as `uint256` values scaled by 10^18,
/// the convention Chainlink-style feeds use.
pub const PRECISION: u32 = 18;

/// An exchange rate: output units per one input unit, scaled by
/// [`PRECISION`] fractional digits.
///
/// Supplied externally by the oracle; never mutated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u128);

impl Rate {
    pub const ZERO: Rate = Rate(0);

    pub fn from_scaled(scaled: u128) -> Self {
        Rate(scaled)
    }

    pub fn as_scaled(&self) -> u128 {
        self.0
    }

    /// The rate as a plain decimal number, e.g. `1500` for a scaled value
    /// of `1500 * 10^18`.
    pub fn as_decimal(&self) -> Result<Decimal> {
        let scaled = i128::try_from(self.0)
            .ok()
            .context("Rate exceeds representable range")?;

        Decimal::try_from_i128_with_scale(scaled, PRECISION)
            .context("Rate exceeds representable range")
    }

    /// Compute the swap output for `amount`, truncated to `out_decimals`
    /// fractional digits.
    ///
    /// This is the one piece of arithmetic in the system:
    ///
    /// `output = floor(amount * rate / 10^PRECISION)` rescaled to the output
    /// precision. Exact decimal arithmetic throughout; the remainder below
    /// the output precision is discarded.
    pub fn quote(&self, amount: TokenAmount, out_decimals: u8) -> Result<TokenAmount> {
        let amount = amount.to_decimal()?;
        let rate = self.as_decimal()?;

        let output = amount
            .checked_mul(rate)
            .context("Multiplication overflow")?
            .trunc_with_scale(u32::from(out_decimals));

        TokenAmount::from_decimal(output, out_decimals)
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_decimal() {
            Ok(rate) => write!(f, "{}", rate.normalize()),
            Err(_) => write!(f, "{} (scaled e-{})", self.0, PRECISION),
        }
    }
}

/// The two quotations the system compares for one currency pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePair {
    /// Central-bank quotation, from the Chainlink-style oracle.
    pub official: Rate,
    /// Parallel-market quotation, from our own oracle.
    pub street: Rate,
}

impl RatePair {
    /// Signed percentage by which the street rate deviates from the
    /// official one. Positive when the street market pays more.
    pub fn difference(&self) -> Result<Decimal> {
        let official = self.official.as_decimal()?;
        let street = self.street.as_decimal()?;

        let spread = street
            .checked_sub(official)
            .context("Subtraction overflow")?;

        spread
            .checked_div(official)
            .context("Official rate is zero")?
            .checked_mul(Decimal::ONE_HUNDRED)
            .context("Multiplication overflow")
    }
}

impl Display for RatePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "official {} / street {}", self.official, self.street)
    }
}

/// A static rate source for tests and demos.
#[derive(Clone, Debug)]
pub struct FixedRate(RatePair);

impl FixedRate {
    /// Demo NGN quotations: 800 official, 1500 street.
    pub const OFFICIAL: u128 = 800_000_000_000_000_000_000;
    pub const STREET: u128 = 1_500_000_000_000_000_000_000;

    pub fn new(pair: RatePair) -> Self {
        Self(pair)
    }

    pub fn value(&self) -> RatePair {
        self.0
    }
}

impl Default for FixedRate {
    fn default() -> Self {
        Self(RatePair {
            official: Rate::from_scaled(Self::OFFICIAL),
            street: Rate::from_scaled(Self::STREET),
        })
    }
}

impl crate::traits::LatestRate for FixedRate {
    type Error = Infallible;

    fn latest_rate(&mut self) -> Result<RatePair, Self::Error> {
        Ok(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    const ONE: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn quote_scales_across_precisions() {
        // 1000 tokens at rate 1.5, 18 decimals in, 6 decimals out
        let rate = Rate::from_scaled(ONE + ONE / 2);
        let amount = TokenAmount::parse("1000", 18).unwrap();

        let output = rate.quote(amount, 6).unwrap();

        assert_eq!(output.to_string(), "1500.000000");
    }

    #[test]
    fn quote_truncates_below_output_precision() {
        // 0.0001 * 0.00000001 = 1e-12, invisible at 6 decimals
        let rate = Rate::from_scaled(10_000_000_000);
        let amount = TokenAmount::parse("0.0001", 18).unwrap();

        let output = rate.quote(amount, 6).unwrap();

        assert!(output.is_zero());
        assert_eq!(output.to_string(), "0.000000");
    }

    #[test]
    fn zero_rate_yields_zero_output() {
        let amount = TokenAmount::parse("123.45", 6).unwrap();

        let output = Rate::ZERO.quote(amount, 18).unwrap();

        assert!(output.is_zero());
    }

    #[test]
    fn zero_amount_yields_zero_output() {
        let rate = Rate::from_scaled(1_500 * ONE);

        let output = rate.quote(TokenAmount::zero(6), 18).unwrap();

        assert!(output.is_zero());
    }

    #[test]
    fn reciprocal_rate_round_trips_within_truncation_error() {
        // 10 USDC at rate 3, then back at rate 1/3
        let rate = Rate::from_scaled(3 * ONE);
        let inverse = Rate::from_scaled(ONE * ONE / (3 * ONE));

        let amount = TokenAmount::parse("10", 6).unwrap();
        let out = rate.quote(amount, 18).unwrap();
        let back = inverse.quote(out, 6).unwrap();

        let diff = dec!(10) - back.to_decimal().unwrap();
        assert!(diff >= Decimal::ZERO);
        assert!(diff < dec!(0.0001), "diff was {}", diff);
    }

    #[test]
    fn exact_reciprocal_round_trips_exactly() {
        // 1600 has an exact reciprocal at 18 digits
        let rate = Rate::from_scaled(1_600 * ONE);
        let inverse = Rate::from_scaled(625_000_000_000_000);

        let amount = TokenAmount::parse("250", 6).unwrap();
        let out = rate.quote(amount, 18).unwrap();
        let back = inverse.quote(out, 6).unwrap();

        assert_eq!(back, amount);
    }

    #[test]
    fn difference_between_official_and_street() {
        let pair = RatePair {
            official: Rate::from_scaled(FixedRate::OFFICIAL),
            street: Rate::from_scaled(FixedRate::STREET),
        };

        assert_eq!(pair.difference().unwrap(), dec!(87.5));
    }

    #[test]
    fn difference_is_negative_when_street_trades_below_official() {
        let pair = RatePair {
            official: Rate::from_scaled(1_000 * ONE),
            street: Rate::from_scaled(950 * ONE),
        };

        assert_eq!(pair.difference().unwrap(), dec!(-5));
    }

    #[test]
    fn difference_with_zero_official_rate_is_an_error() {
        let pair = RatePair {
            official: Rate::ZERO,
            street: Rate::from_scaled(ONE),
        };

        assert!(pair.difference().is_err());
    }

    proptest! {
        #[test]
        fn quote_never_panics_and_never_goes_negative(
            units in 0u128..1_000_000_000_000_000_000_000_000,
            scaled in 0u128..1_000_000_000_000_000_000_000_000,
        ) {
            let rate = Rate::from_scaled(scaled);
            let amount = TokenAmount::from_base_units(units, 18);

            if let Ok(output) = rate.quote(amount, 6) {
                // u128 base units cannot be negative; the property worth
                // checking is that zero inputs pin the output to zero
                if units == 0 || scaled == 0 {
                    prop_assert!(output.is_zero());
                }
            }
        }

        #[test]
        fn quote_is_monotone_in_the_amount(
            a in 0u128..1_000_000_000_000_000_000,
            b in 0u128..1_000_000_000_000_000_000,
            scaled in 1u128..1_000_000_000_000_000_000_000,
        ) {
            let rate = Rate::from_scaled(scaled);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let lo_out = rate.quote(TokenAmount::from_base_units(lo, 6), 18).unwrap();
            let hi_out = rate.quote(TokenAmount::from_base_units(hi, 6), 18).unwrap();

            prop_assert!(lo_out.base_units() <= hi_out.base_units());
        }

        #[test]
        fn quote_is_deterministic(
            units in 0u128..1_000_000_000_000_000_000,
            scaled in 0u128..1_000_000_000_000_000_000_000,
        ) {
            let rate = Rate::from_scaled(scaled);
            let amount = TokenAmount::from_base_units(units, 6);

            let first = rate.quote(amount, 18).unwrap();
            let second = rate.quote(amount, 18).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}
