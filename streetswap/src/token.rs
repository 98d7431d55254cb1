use crate::hook::CallContract;
use crate::oracle::ReadContract;
use anyhow::{Context, Result};
use std::sync::Arc;
use streetswap_eth::{Address, CallArg, CallData, TokenAmount, TxHash, TxStatus};

/// Client for one ERC20 token contract.
///
/// The testnet tokens additionally expose a public `mint` so users can
/// give themselves something to swap with.
#[derive(Clone)]
pub struct Erc20Client {
    reader: Arc<dyn ReadContract + Send + Sync>,
    caller: Arc<dyn CallContract + Send + Sync>,
    token: Address,
    decimals: u8,
}

impl Erc20Client {
    pub fn new(
        reader: Arc<dyn ReadContract + Send + Sync>,
        caller: Arc<dyn CallContract + Send + Sync>,
        token: Address,
        decimals: u8,
    ) -> Self {
        Self {
            reader,
            caller,
            token,
            decimals,
        }
    }

    pub fn address(&self) -> Address {
        self.token
    }

    pub async fn balance_of(&self, account: Address) -> Result<TokenAmount> {
        let call = CallData::new(self.token, "balanceOf", vec![CallArg::Address(account)]);

        let units = self
            .reader
            .read_uint(call)
            .await
            .with_context(|| format!("Failed to fetch balance of {}", account.short()))?;

        Ok(TokenAmount::from_base_units(units, self.decimals))
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<TokenAmount> {
        let call = CallData::new(
            self.token,
            "allowance",
            vec![CallArg::Address(owner), CallArg::Address(spender)],
        );

        let units = self
            .reader
            .read_uint(call)
            .await
            .context("Failed to fetch allowance")?;

        Ok(TokenAmount::from_base_units(units, self.decimals))
    }

    /// Grant `spender` the right to move `amount` of the caller's tokens.
    pub async fn approve(&self, spender: Address, amount: TokenAmount) -> Result<TxHash> {
        let call = CallData::new(
            self.token,
            "approve",
            vec![
                CallArg::Address(spender),
                CallArg::Uint(amount.base_units()),
            ],
        );

        let tx_hash = self
            .caller
            .submit(call)
            .await
            .context("Failed to submit approval")?;

        tracing::info!(tx = %tx_hash.short(), spender = %spender.short(), "Approval submitted");

        Ok(tx_hash)
    }

    pub async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<TxStatus> {
        self.caller.wait_for_receipt(tx_hash).await
    }

    /// Mint test tokens to `recipient`. Only the testnet deployments
    /// expose this.
    pub async fn mint(&self, recipient: Address, amount: TokenAmount) -> Result<TxHash> {
        let call = CallData::new(
            self.token,
            "mint",
            vec![
                CallArg::Address(recipient),
                CallArg::Uint(amount.base_units()),
            ],
        );

        let tx_hash = self
            .caller
            .submit(call)
            .await
            .context("Failed to submit mint")?;

        tracing::info!(tx = %tx_hash.short(), "Mint submitted");

        Ok(tx_hash)
    }
}
