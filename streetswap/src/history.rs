use serde::Serialize;
use std::collections::VecDeque;
use std::time::SystemTime;
use streetswap_eth::{TokenAmount, TxHash};

/// How many confirmed swaps we keep around for display.
pub const CAPACITY: usize = 5;

/// One confirmed swap, as proven by its on-chain transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapRecord {
    pub tx_hash: TxHash,
    pub currency_code: String,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    pub timestamp: SystemTime,
}

/// Bounded, most-recent-first record of confirmed swaps.
///
/// Kept in memory only; the chain itself is the durable record and the
/// block explorer the place to verify it.
#[derive(Debug, Clone, Default)]
pub struct SwapHistory {
    entries: VecDeque<SwapRecord>,
}

impl SwapHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: SwapRecord) {
        self.entries.push_front(record);
        self.entries.truncate(CAPACITY);
    }

    /// Most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &SwapRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u32) -> SwapRecord {
        SwapRecord {
            tx_hash: TxHash(format!("0x{:04}", n)),
            currency_code: "NGN".to_owned(),
            amount_in: TokenAmount::from_base_units(u128::from(n), 6),
            amount_out: TokenAmount::from_base_units(u128::from(n) * 1_500, 18),
            timestamp: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn newest_entry_comes_first() {
        let mut history = SwapHistory::new();
        history.record(record(1));
        history.record(record(2));

        let hashes: Vec<_> = history.entries().map(|r| r.tx_hash.clone()).collect();

        assert_eq!(hashes, vec![TxHash("0x0002".into()), TxHash("0x0001".into())]);
    }

    #[test]
    fn history_is_bounded() {
        let mut history = SwapHistory::new();
        for n in 0..10 {
            history.record(record(n));
        }

        assert_eq!(history.len(), CAPACITY);
        // the oldest entries fell off
        assert_eq!(
            history.entries().last().unwrap().tx_hash,
            TxHash("0x0005".into())
        );
    }
}
