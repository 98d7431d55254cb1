//! Shapes of the externally defined contract ABIs this system composes.
//!
//! Nothing here designs a wire format: a call is just the
//! (contract address, function name, arguments) tuple the surrounding
//! wallet library understands, and a transaction hash is the opaque
//! identifier it hands back.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency code encoded as a Solidity `bytes32` short string:
/// ASCII bytes, right-padded with zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyId([u8; 32]);

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CurrencyIdError {
    #[error("currency code must be 1-32 ASCII characters, got {0:?}")]
    InvalidCode(String),
}

impl CurrencyId {
    pub fn new(code: &str) -> Result<Self, CurrencyIdError> {
        if code.is_empty() || code.len() > 32 || !code.is_ascii() {
            return Err(CurrencyIdError::InvalidCode(code.to_owned()));
        }

        let mut bytes = [0u8; 32];
        bytes[..code.len()].copy_from_slice(code.as_bytes());

        Ok(CurrencyId(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The ASCII code without the zero padding.
    pub fn code(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(32);
        // only constructible from ASCII
        std::str::from_utf8(&self.0[..end]).unwrap_or_default()
    }
}

impl FromStr for CurrencyId {
    type Err = CurrencyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyId::new(s)
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Debug for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyId({})", self.code())
    }
}

/// A single argument of a contract call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    Address(Address),
    Bytes32(CurrencyId),
    Uint(u128),
}

/// One contract invocation: where, what, and with which arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallData {
    pub address: Address,
    pub function: String,
    pub args: Vec<CallArg>,
}

impl CallData {
    pub fn new(address: Address, function: impl Into<String>, args: Vec<CallArg>) -> Self {
        Self {
            address,
            function: function.into(),
            args,
        }
    }
}

impl fmt::Display for CallData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.function)
    }
}

/// Opaque identifier of a submitted transaction.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl TxHash {
    /// Shortened form for log lines, mirroring how explorers abbreviate.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(10);
        self.0.get(..end).unwrap_or(&self.0)
    }
}

impl From<TxHash> for String {
    fn from(from: TxHash) -> Self {
        from.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.0)
    }
}

/// Final status of a submitted transaction, as reported by the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Confirmed,
    Failed,
}
