use anyhow::{Context, Result};
use serde::Serialize;
use streetswap_env::Contracts;
use streetswap_eth::{Address, CurrencyId};

/// A currency the system can swap out of USDC.
///
/// Static configuration; nothing here changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    /// Fractional digits of the ERC20 token representing this currency.
    pub decimals: u8,
}

/// The quote stablecoin every pair trades against.
pub const USDC: Currency = Currency {
    code: "USDC",
    name: "USD Coin",
    symbol: "$",
    decimals: 6,
};

/// The emerging-market currencies with an official and a street quotation.
pub const CURRENCIES: [Currency; 3] = [
    Currency {
        code: "NGN",
        name: "Nigerian Naira",
        symbol: "₦",
        decimals: 18,
    },
    Currency {
        code: "ARS",
        name: "Argentine Peso",
        symbol: "$",
        decimals: 18,
    },
    Currency {
        code: "GHS",
        name: "Ghanaian Cedi",
        symbol: "₵",
        decimals: 18,
    },
];

pub fn by_code(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|currency| currency.code == code)
}

impl Currency {
    /// The bytes32 identifier the oracle and hook contracts key on.
    pub fn id(&self) -> CurrencyId {
        CurrencyId::new(self.code).expect("static codes are valid")
    }

    pub fn token_address(&self, contracts: &Contracts) -> Result<Address> {
        contracts
            .token(self.code)
            .with_context(|| format!("No token deployed for {}", self.code))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
