use crate::history::{SwapHistory, SwapRecord};
use crate::hook::HookClient;
use crate::quote::SwapQuote;
use crate::token::Erc20Client;
use crate::wallet::ConnectionStatus;
use anyhow::{bail, Context, Result};
use std::time::SystemTime;
use streetswap_eth::TxStatus;

/// Drives a quoted swap end to end: allowance check, approval if needed,
/// swap submission, confirmation, history entry.
pub struct Swapper {
    usdc: Erc20Client,
    hook: HookClient,
    history: SwapHistory,
}

impl Swapper {
    pub fn new(usdc: Erc20Client, hook: HookClient) -> Self {
        Self {
            usdc,
            hook,
            history: SwapHistory::new(),
        }
    }

    pub fn history(&self) -> &SwapHistory {
        &self.history
    }

    /// Execute a previewed swap.
    ///
    /// Refuses to do anything without a connected wallet; a missing quote
    /// never reaches this point because [`crate::quote::preview`] already
    /// withheld it.
    pub async fn swap(&mut self, quote: &SwapQuote, wallet: ConnectionStatus) -> Result<SwapRecord> {
        let account = wallet.account().context("Wallet is not connected")?;

        let allowance = self
            .usdc
            .allowance(account, self.hook.address())
            .await
            .context("Failed to check hook allowance")?;

        if allowance < quote.amount_in {
            tracing::info!(
                %allowance,
                required = %quote.amount_in,
                "Allowance too low, requesting approval"
            );

            let approval = self.usdc.approve(self.hook.address(), quote.amount_in).await?;
            let status = self
                .usdc
                .wait_for_receipt(&approval)
                .await
                .context("Failed to wait for approval receipt")?;

            if status == TxStatus::Failed {
                bail!("Approval reverted on chain");
            }
        }

        let receipt = self
            .hook
            .swap_and_confirm(&quote.currency, quote.amount_in)
            .await?;

        if receipt.status == TxStatus::Failed {
            bail!("Swap {} reverted on chain", receipt.tx_hash);
        }

        let record = SwapRecord {
            tx_hash: receipt.tx_hash,
            currency_code: quote.currency.code.to_owned(),
            amount_in: quote.amount_in,
            amount_out: quote.amount_out,
            timestamp: SystemTime::now(),
        };
        self.history.record(record.clone());

        Ok(record)
    }
}
