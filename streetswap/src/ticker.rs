use crate::currency::Currency;
use crate::quote::{preview, SwapQuote};
use anyhow::Result;
use std::time::Duration;
use streetswap_feed::{OracleRate, RateUpdateStream};

/// Follows a rate feed and previews the same swap against every update.
///
/// Drives the preview loop for a binary; the feed itself polls in the
/// background and this only reacts to its updates.
pub struct Ticker {
    updates: RateUpdateStream,
    stale_after: Duration,
}

impl Ticker {
    pub fn new(updates: RateUpdateStream, stale_after: Duration) -> Self {
        Self {
            updates,
            stale_after,
        }
    }

    /// Wait for the next rate update and preview swapping `input` USDC
    /// into `currency`.
    ///
    /// `None` when the feed stayed silent past the staleness window or the
    /// update did not yield a previewable quote.
    pub async fn tick(&mut self, input: &str, currency: &Currency) -> Result<Option<SwapQuote>> {
        let update = tokio::time::timeout(self.stale_after, self.updates.wait_for_update()).await;

        match update {
            Err(_elapsed) => {
                tracing::warn!(
                    "No rate update within {}s, still waiting",
                    self.stale_after.as_secs()
                );
                Ok(None)
            }
            Ok(update) => {
                // a failed update is not fatal; preview treats the rate as unknown
                let _ = update?;

                let mut rates = OracleRate::new(self.updates.clone());
                Ok(preview(input, currency, &mut rates))
            }
        }
    }

    pub async fn run(&mut self, input: &str, currency: &Currency) -> Result<()> {
        loop {
            if let Some(quote) = self.tick(input, currency).await? {
                match quote.rates.difference() {
                    Ok(difference) => {
                        tracing::info!(%quote, %difference, "Street rate preview");
                    }
                    Err(_) => {
                        tracing::info!(%quote, "Street rate preview");
                    }
                }
            }
        }
    }
}
