use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use streetswap::currency::by_code;
use streetswap::oracle::{OracleClient, ReadContract};
use streetswap::ticker::Ticker;
use streetswap::trace::init_tracing;
use streetswap_env::{
    default_config_path, initial_setup, query_user_for_initial_config, read_config,
    ConfigNotInitialized,
};
use streetswap_eth::CallData;
use streetswap_feed::{connect, FixedRate};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const STALE_AFTER: Duration = Duration::from_secs(30);

/// Stands in for the wallet library's contract reader, answering rate
/// queries with the demo quotations instead of RPC calls.
struct DemoChain;

#[async_trait]
impl ReadContract for DemoChain {
    async fn read_uint(&self, call: CallData) -> Result<u128> {
        match call.function.as_str() {
            "getOfficialRate" => Ok(FixedRate::OFFICIAL),
            "getStreetRate" => Ok(FixedRate::STREET),
            other => bail!("unexpected read of {}", other),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(LevelFilter::INFO).expect("initialize tracing");

    let config_path = default_config_path()?;

    let config = match read_config(config_path.clone())? {
        Ok(config) => config,
        Err(ConfigNotInitialized {}) => {
            initial_setup(config_path.clone(), query_user_for_initial_config)?;
            read_config(config_path)?.expect("after initial setup config can be read")
        }
    };

    info!(
        "Previewing swaps against the oracle at {} on chain {}",
        config.contracts.oracle, config.network.chain_id
    );

    let ngn = by_code("NGN").context("NGN is a supported currency")?;

    let oracle = OracleClient::new(Arc::new(DemoChain), config.contracts.oracle);
    let updates = connect(oracle, ngn.id(), POLL_INTERVAL)?;

    let mut ticker = Ticker::new(updates, STALE_AFTER);
    ticker.run("100", ngn).await
}
