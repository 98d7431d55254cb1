use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use streetswap_eth::{Address, CallArg, CallData, CurrencyId};
use streetswap_feed::{Rate, RateOracle};

/// The read-only contract-query capability, supplied by the surrounding
/// wallet library. Queries are keyed by (contract address, function name,
/// arguments); this system only ever reads single unsigned integers.
#[async_trait]
pub trait ReadContract {
    async fn read_uint(&self, call: CallData) -> Result<u128>;
}

/// Client for the rate oracle contract: one official and one street
/// quotation per currency.
#[derive(Clone)]
pub struct OracleClient {
    reader: Arc<dyn ReadContract + Send + Sync>,
    oracle: Address,
}

impl OracleClient {
    pub fn new(reader: Arc<dyn ReadContract + Send + Sync>, oracle: Address) -> Self {
        Self { reader, oracle }
    }

    async fn rate(&self, function: &str, currency: CurrencyId) -> Result<Rate> {
        let call = CallData::new(self.oracle, function, vec![CallArg::Bytes32(currency)]);

        let scaled = self
            .reader
            .read_uint(call)
            .await
            .with_context(|| format!("Failed to fetch {} for {}", function, currency))?;

        Ok(Rate::from_scaled(scaled))
    }
}

#[async_trait]
impl RateOracle for OracleClient {
    async fn official_rate(&self, currency: CurrencyId) -> Result<Rate> {
        self.rate("getOfficialRate", currency).await
    }

    async fn street_rate(&self, currency: CurrencyId) -> Result<Rate> {
        self.rate("getStreetRate", currency).await
    }
}
