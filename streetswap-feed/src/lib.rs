pub mod oracle;
pub mod rate;
pub mod traits;

// Re-exports for convenience
pub use oracle::{connect, Error as OracleError, OracleRate, RateOracle, RateUpdateStream};
pub use rate::{FixedRate, Rate, RatePair, PRECISION};
pub use traits::LatestRate;
