use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::de::Visitor;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A token amount in base units, tagged with the token's decimal precision.
///
/// ERC20 tokens disagree on precision (USDC carries 6 decimals, most others
/// 18), so unlike a piconero or satoshi amount the scale travels with the
/// value. All arithmetic is exact; fractions below the precision are
/// truncated, never rounded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    units: u128,
    decimals: u8,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseAmountError {
    #[error("'{0}' is not a decimal number")]
    Invalid(String),
    #[error("amount must not be negative")]
    Negative,
    #[error("amount does not fit the token's precision")]
    Overflow,
}

impl TokenAmount {
    pub fn from_base_units(units: u128, decimals: u8) -> Self {
        Self { units, decimals }
    }

    pub fn zero(decimals: u8) -> Self {
        Self { units: 0, decimals }
    }

    pub fn base_units(&self) -> u128 {
        self.units
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Parse a human-readable decimal string into base units.
    ///
    /// Digits beyond the token's precision are truncated, matching the
    /// on-chain contract which never sees them.
    pub fn parse(input: &str, decimals: u8) -> Result<Self, ParseAmountError> {
        let input = input.trim();
        let value =
            Decimal::from_str(input).map_err(|_| ParseAmountError::Invalid(input.to_owned()))?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(ParseAmountError::Negative);
        }

        let truncated = value.trunc_with_scale(u32::from(decimals));

        let mantissa = u128::try_from(truncated.mantissa()).map_err(|_| ParseAmountError::Negative)?;
        let rescale = 10u128
            .checked_pow(u32::from(decimals) - truncated.scale())
            .ok_or(ParseAmountError::Overflow)?;
        let units = mantissa
            .checked_mul(rescale)
            .ok_or(ParseAmountError::Overflow)?;

        Ok(Self { units, decimals })
    }

    /// The amount in whole-token units.
    pub fn to_decimal(&self) -> Result<Decimal> {
        let units = i128::try_from(self.units)
            .ok()
            .context("Amount exceeds representable range")?;

        Decimal::try_from_i128_with_scale(units, u32::from(self.decimals))
            .context("Amount exceeds representable range")
    }

    /// Convert a whole-token decimal value into base units, truncating
    /// anything below the precision.
    pub fn from_decimal(value: Decimal, decimals: u8) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            bail!("Amount must not be negative: {}", value);
        }

        let truncated = value.trunc_with_scale(u32::from(decimals));

        let mantissa =
            u128::try_from(truncated.mantissa()).context("Amount must not be negative")?;
        let rescale = 10u128
            .checked_pow(u32::from(decimals) - truncated.scale())
            .context("Unsupported decimal precision")?;
        let units = mantissa
            .checked_mul(rescale)
            .context("Amount does not fit into base units")?;

        Ok(Self { units, decimals })
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        if self.decimals != rhs.decimals {
            return None;
        }

        Some(Self {
            units: self.units.checked_add(rhs.units)?,
            decimals: self.decimals,
        })
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        if self.decimals != rhs.decimals {
            return None;
        }

        Some(Self {
            units: self.units.checked_sub(rhs.units)?,
            decimals: self.decimals,
        })
    }
}

/// Amounts of different precisions never compare; `checked_add` and friends
/// refuse them, and so does ordering.
impl PartialOrd for TokenAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.decimals == other.decimals).then(|| self.units.cmp(&other.units))
    }
}

/// Parse an amount from its canonical display form, taking the precision
/// from the number of fractional digits: `"1500.000000"` is 6 decimals.
impl FromStr for TokenAmount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| ParseAmountError::Invalid(s.to_owned()))?;
        let decimals =
            u8::try_from(value.scale()).map_err(|_| ParseAmountError::Overflow)?;

        Self::parse(s, decimals)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match 10u128.checked_pow(u32::from(self.decimals)) {
            Some(scale) if self.decimals > 0 => {
                let whole = self.units / scale;
                let frac = self.units % scale;
                write!(
                    f,
                    "{}.{:0width$}",
                    whole,
                    frac,
                    width = usize::from(self.decimals)
                )
            }
            Some(_) => write!(f, "{}", self.units),
            // decimals beyond u128 range, only reachable with corrupt input
            None => write!(f, "{} base units (e-{})", self.units, self.decimals),
        }
    }
}

impl Serialize for TokenAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            (self.units, self.decimals).serialize(serializer)
        }
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a decimal amount string")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        s.parse().map_err(|err| E::custom(format!("{}", err)))
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D>(deserializer: D) -> Result<TokenAmount, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(AmountVisitor)
        } else {
            let (units, decimals) = <(u128, u8)>::deserialize(deserializer)?;

            Ok(TokenAmount { units, decimals })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_whole_tokens_into_base_units() {
        let amount = TokenAmount::parse("1000", 18).unwrap();

        assert_eq!(amount.base_units(), 1_000_000_000_000_000_000_000);
    }

    #[test]
    fn parses_fractional_usdc() {
        let amount = TokenAmount::parse("12.5", 6).unwrap();

        assert_eq!(amount.base_units(), 12_500_000);
    }

    #[test]
    fn truncates_digits_below_precision() {
        let amount = TokenAmount::parse("1.1234567", 6).unwrap();

        assert_eq!(amount.base_units(), 1_123_456);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(matches!(
            TokenAmount::parse("", 6),
            Err(ParseAmountError::Invalid(_))
        ));
        assert!(matches!(
            TokenAmount::parse("12abc", 6),
            Err(ParseAmountError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(TokenAmount::parse("-1", 6), Err(ParseAmountError::Negative));
    }

    #[test]
    fn displays_with_full_precision() {
        let amount = TokenAmount::from_base_units(1_500_000_000, 6);

        assert_eq!(amount.to_string(), "1500.000000");
    }

    #[test]
    fn displays_zero_decimals_without_point() {
        let amount = TokenAmount::from_base_units(42, 0);

        assert_eq!(amount.to_string(), "42");
    }

    #[test]
    fn round_trips_through_decimal() {
        let amount = TokenAmount::parse("0.0001", 18).unwrap();

        assert_eq!(amount.base_units(), 100_000_000_000_000);
        assert_eq!(amount.to_decimal().unwrap(), dec!(0.0001));
    }

    #[test]
    fn from_decimal_truncates() {
        let amount = TokenAmount::from_decimal(dec!(0.0000000001), 6).unwrap();

        assert!(amount.is_zero());
        assert_eq!(amount.to_string(), "0.000000");
    }

    #[test]
    fn comparison_requires_matching_precision() {
        // raw base units would say 1 NGN > 100 USDC
        let one_ngn = TokenAmount::parse("1", 18).unwrap();
        let hundred_usdc = TokenAmount::parse("100", 6).unwrap();

        assert_eq!(one_ngn.partial_cmp(&hundred_usdc), None);
        assert!(!(one_ngn > hundred_usdc));
        assert!(!(one_ngn < hundred_usdc));

        let ten = TokenAmount::parse("10", 6).unwrap();
        let hundred = TokenAmount::parse("100", 6).unwrap();
        assert!(ten < hundred);
    }

    #[test]
    fn serializes_to_decimal_string() {
        let amount = TokenAmount::from_base_units(1_500_000_000, 6);

        assert_eq!(
            serde_json::to_string(&amount).unwrap(),
            "\"1500.000000\""
        );
    }

    #[test]
    fn deserializes_with_inferred_precision() {
        let amount: TokenAmount = serde_json::from_str("\"1500.000000\"").unwrap();

        assert_eq!(amount, TokenAmount::from_base_units(1_500_000_000, 6));
        assert_eq!(amount.decimals(), 6);
    }

    #[test]
    fn serde_rejects_negative_amounts() {
        let result = serde_json::from_str::<TokenAmount>("\"-1.5\"");

        assert!(result.is_err());
    }

    #[test]
    fn addition_requires_matching_precision() {
        let usdc = TokenAmount::parse("1", 6).unwrap();
        let ngn = TokenAmount::parse("1", 18).unwrap();

        assert_eq!(usdc.checked_add(ngn), None);
        assert_eq!(
            usdc.checked_add(usdc),
            Some(TokenAmount::from_base_units(2_000_000, 6))
        );
    }
}
