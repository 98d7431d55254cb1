use crate::currency::{Currency, USDC};
use serde::Serialize;
use streetswap_eth::TokenAmount;
use streetswap_feed::{LatestRate, RatePair};

/// A swap preview: what the user would receive for their USDC at the
/// current street rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwapQuote {
    pub currency: Currency,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    pub rates: RatePair,
}

impl std::fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} USDC -> {} {}",
            self.amount_in, self.amount_out, self.symbol()
        )
    }
}

impl SwapQuote {
    fn symbol(&self) -> &'static str {
        self.currency.symbol
    }
}

/// Preview a swap of `input` USDC into `currency` at the street rate.
///
/// Returns `None` — so the caller suppresses the preview and withholds the
/// swap action — when the input is empty or not a non-negative number, or
/// when the rate is not currently known. An unknown rate is never treated
/// as zero. A zero rate is a real value and previews a zero output.
pub fn preview<L>(input: &str, currency: &Currency, rates: &mut L) -> Option<SwapQuote>
where
    L: LatestRate,
{
    if input.trim().is_empty() {
        return None;
    }

    let amount_in = TokenAmount::parse(input, USDC.decimals).ok()?;

    let pair = match rates.latest_rate() {
        Ok(pair) => pair,
        Err(error) => {
            tracing::debug!(%error, "No rate available, withholding preview");
            return None;
        }
    };

    let amount_out = pair.street.quote(amount_in, currency.decimals).ok()?;

    Some(SwapQuote {
        currency: *currency,
        amount_in,
        amount_out,
        rates: pair,
    })
}
