pub mod currency;
pub mod history;
pub mod hook;
pub mod oracle;
pub mod quote;
pub mod swap;
pub mod ticker;
pub mod token;
pub mod trace;
pub mod wallet;

pub use currency::{Currency, CURRENCIES, USDC};
pub use history::{SwapHistory, SwapRecord};
pub use hook::{CallContract, HookClient, SwapReceipt};
pub use oracle::{OracleClient, ReadContract};
pub use quote::{preview, SwapQuote};
pub use swap::Swapper;
pub use ticker::Ticker;
pub use token::Erc20Client;
pub use wallet::ConnectionStatus;
