use crate::currency::Currency;
use crate::oracle::ReadContract;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use streetswap_eth::{Address, CallArg, CallData, TokenAmount, TxHash, TxStatus};

/// The submit-action primitive supplied by the wallet library: it signs,
/// broadcasts and later reports on a transaction. Reverts and network
/// failures are surfaced verbatim, never reinterpreted here.
#[async_trait]
pub trait CallContract {
    async fn submit(&self, call: CallData) -> Result<TxHash>;

    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxStatus>;
}

/// Outcome of a submitted swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub tx_hash: TxHash,
    pub status: TxStatus,
}

/// Client for the swap hook contract.
#[derive(Clone)]
pub struct HookClient {
    reader: Arc<dyn ReadContract + Send + Sync>,
    caller: Arc<dyn CallContract + Send + Sync>,
    hook: Address,
}

impl HookClient {
    pub fn new(
        reader: Arc<dyn ReadContract + Send + Sync>,
        caller: Arc<dyn CallContract + Send + Sync>,
        hook: Address,
    ) -> Self {
        Self {
            reader,
            caller,
            hook,
        }
    }

    pub fn address(&self) -> Address {
        self.hook
    }

    /// The hook's own view of the swap output, for cross-checking a local
    /// preview against what the contract will actually pay out.
    pub async fn swap_output(
        &self,
        currency: &Currency,
        amount_in: TokenAmount,
    ) -> Result<TokenAmount> {
        let call = CallData::new(
            self.hook,
            "getSwapOutput",
            vec![
                CallArg::Bytes32(currency.id()),
                CallArg::Uint(amount_in.base_units()),
            ],
        );

        let units = self
            .reader
            .read_uint(call)
            .await
            .with_context(|| format!("Failed to fetch swap output for {}", currency.code))?;

        Ok(TokenAmount::from_base_units(units, currency.decimals))
    }

    /// Submit the swap to the hook contract.
    pub async fn swap(&self, currency: &Currency, amount_in: TokenAmount) -> Result<TxHash> {
        let call = CallData::new(
            self.hook,
            "swap",
            vec![
                CallArg::Bytes32(currency.id()),
                CallArg::Uint(amount_in.base_units()),
            ],
        );

        let tx_hash = self
            .caller
            .submit(call)
            .await
            .with_context(|| format!("Failed to submit swap for {}", currency.code))?;

        tracing::info!(tx = %tx_hash.short(), currency = %currency.code, "Swap submitted");

        Ok(tx_hash)
    }

    /// Submit the swap and wait for the chain to confirm or reject it.
    pub async fn swap_and_confirm(
        &self,
        currency: &Currency,
        amount_in: TokenAmount,
    ) -> Result<SwapReceipt> {
        let tx_hash = self.swap(currency, amount_in).await?;

        tracing::debug!(tx = %tx_hash.short(), "Waiting for confirmation");

        let status = self
            .caller
            .wait_for_receipt(&tx_hash)
            .await
            .context("Failed to wait for swap receipt")?;

        match status {
            TxStatus::Confirmed => {
                tracing::info!(tx = %tx_hash.short(), "Swap confirmed on chain");
            }
            TxStatus::Failed => {
                tracing::warn!(tx = %tx_hash.short(), "Swap reverted on chain");
            }
        }

        Ok(SwapReceipt { tx_hash, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::by_code;
    use std::sync::Mutex;
    use streetswap_env::Contracts;

    struct MockChain {
        submitted: Mutex<Vec<CallData>>,
    }

    #[async_trait]
    impl CallContract for MockChain {
        async fn submit(&self, call: CallData) -> Result<TxHash> {
            self.submitted.lock().unwrap().push(call);

            Ok(TxHash("0xdeadbeef".to_owned()))
        }

        async fn wait_for_receipt(&self, _tx_hash: &TxHash) -> Result<TxStatus> {
            Ok(TxStatus::Confirmed)
        }
    }

    #[async_trait]
    impl ReadContract for MockChain {
        async fn read_uint(&self, _call: CallData) -> Result<u128> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn swap_submits_bytes32_currency_and_base_units() {
        let chain = Arc::new(MockChain {
            submitted: Mutex::new(vec![]),
        });
        let contracts = Contracts::lisk_sepolia();
        let hook = HookClient::new(chain.clone(), chain.clone(), contracts.hook);

        let ngn = by_code("NGN").unwrap();
        let amount = TokenAmount::parse("25", crate::currency::USDC.decimals).unwrap();

        let receipt = hook.swap_and_confirm(ngn, amount).await.unwrap();

        assert_eq!(receipt.status, TxStatus::Confirmed);

        let submitted = chain.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].address, contracts.hook);
        assert_eq!(submitted[0].function, "swap");
        assert_eq!(
            submitted[0].args,
            vec![CallArg::Bytes32(ngn.id()), CallArg::Uint(25_000_000)]
        );
    }
}
