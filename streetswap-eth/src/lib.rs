pub mod abi;
pub mod address;
pub mod amount;

pub use abi::{CallArg, CallData, CurrencyId, TxHash, TxStatus};
pub use address::Address;
pub use amount::TokenAmount;
