use crate::rate::{Rate, RatePair};
use crate::traits::LatestRate;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use streetswap_eth::CurrencyId;
use tokio::sync::watch;

/// The read-only contract-query collaborator: one call per quotation,
/// keyed by currency, both returning 18-digit scaled rates.
#[async_trait]
pub trait RateOracle {
    async fn official_rate(&self, currency: CurrencyId) -> Result<Rate>;

    async fn street_rate(&self, currency: CurrencyId) -> Result<Rate>;
}

/// Poll the oracle for a constant stream of rate updates.
///
/// If a poll fails, it will automatically be retried with exponential
/// backoff; subscribers keep seeing the last good value in the meantime.
pub fn connect<O>(
    oracle: O,
    currency: CurrencyId,
    poll_interval: Duration,
) -> Result<RateUpdateStream>
where
    O: RateOracle + Send + Sync + 'static,
{
    let (rate_update, rate_update_receiver) = watch::channel(Err(Error::NotYetAvailable));
    let rate_update = Arc::new(rate_update);
    let oracle = Arc::new(oracle);

    tokio::spawn(async move {
        // The default backoff config is fine for us apart from one thing:
        // `max_elapsed_time`. If we don't get an error within this timeframe,
        // backoff won't actually retry the operation.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: None,
            ..backoff::ExponentialBackoff::default()
        };

        let result = backoff::future::retry_notify::<Infallible, _, _, _, _, _>(
            backoff,
            || {
                let rate_update = rate_update.clone();
                let oracle = oracle.clone();
                async move {
                    loop {
                        let official = oracle
                            .official_rate(currency)
                            .await
                            .map_err(backoff::Error::transient)?;
                        let street = oracle
                            .street_rate(currency)
                            .await
                            .map_err(backoff::Error::transient)?;

                        let send_result = rate_update.send(Ok(RatePair { official, street }));

                        if send_result.is_err() {
                            return Err(backoff::Error::permanent(anyhow!(
                                "receiver disconnected"
                            )));
                        }

                        tokio::time::sleep(poll_interval).await;
                    }
                }
            },
            |error, next: Duration| {
                tracing::info!(%error, "Oracle poll failed, retrying in {}ms", next.as_millis());
            },
        )
        .await;

        match result {
            Err(e) => {
                tracing::warn!("Rate updates incurred an unrecoverable error: {:#}", e);

                // in case the retries fail permanently, let the subscribers know
                let _ = rate_update.send(Err(Error::PermanentFailure));
            }
            Ok(never) => match never {},
        }
    });

    Ok(RateUpdateStream {
        inner: rate_update_receiver,
    })
}

#[derive(Clone, Debug)]
pub struct RateUpdateStream {
    inner: watch::Receiver<RateUpdate>,
}

impl RateUpdateStream {
    pub async fn wait_for_update(&mut self) -> Result<RateUpdate> {
        self.inner.changed().await?;

        Ok(self.inner.borrow().clone())
    }

    pub fn latest_update(&mut self) -> RateUpdate {
        self.inner.borrow().clone()
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("Rate is not yet available")]
    NotYetAvailable,
    #[error("Permanently failed to retrieve rate from the oracle")]
    PermanentFailure,
}

type RateUpdate = Result<RatePair, Error>;

/// Produces [`RatePair`]s from the latest update of a polling
/// [`RateUpdateStream`].
#[derive(Debug, Clone)]
pub struct OracleRate {
    rate_updates: RateUpdateStream,
}

impl OracleRate {
    pub fn new(rate_updates: RateUpdateStream) -> Self {
        Self { rate_updates }
    }
}

impl LatestRate for OracleRate {
    type Error = Error;

    fn latest_rate(&mut self) -> Result<RatePair, Self::Error> {
        self.rate_updates.latest_update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyOracle {
        calls: AtomicU32,
    }

    #[async_trait]
    impl RateOracle for FlakyOracle {
        async fn official_rate(&self, _currency: CurrencyId) -> Result<Rate> {
            // first poll fails, afterwards the oracle recovers
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("rpc connection reset");
            }

            Ok(Rate::from_scaled(800_000_000_000_000_000_000))
        }

        async fn street_rate(&self, _currency: CurrencyId) -> Result<Rate> {
            Ok(Rate::from_scaled(1_500_000_000_000_000_000_000))
        }
    }

    #[tokio::test]
    async fn recovers_from_transient_poll_failures() {
        let oracle = FlakyOracle {
            calls: AtomicU32::new(0),
        };
        let currency = CurrencyId::new("NGN").unwrap();

        let mut stream = connect(oracle, currency, Duration::from_millis(10)).unwrap();

        let update = stream.wait_for_update().await.unwrap().unwrap();

        assert_eq!(
            update.street,
            Rate::from_scaled(1_500_000_000_000_000_000_000)
        );
    }

    #[tokio::test]
    async fn latest_update_before_first_poll_is_not_yet_available() {
        // never polled because we read synchronously before the task runs
        struct NeverOracle;

        #[async_trait]
        impl RateOracle for NeverOracle {
            async fn official_rate(&self, _currency: CurrencyId) -> Result<Rate> {
                never_resolves().await
            }

            async fn street_rate(&self, _currency: CurrencyId) -> Result<Rate> {
                never_resolves().await
            }
        }

        async fn never_resolves() -> Result<Rate> {
            std::future::pending().await
        }

        let currency = CurrencyId::new("ARS").unwrap();
        let mut stream = connect(NeverOracle, currency, Duration::from_secs(1)).unwrap();

        assert!(matches!(
            stream.latest_update(),
            Err(Error::NotYetAvailable)
        ));
    }
}
