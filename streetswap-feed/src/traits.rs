use crate::rate::RatePair;

/// Synchronous access to the most recently observed rate pair.
///
/// Implementations decide where the rates come from: a fixed value, the
/// latest update of a polling feed, or anything else. A caller that gets an
/// error must treat the rate as unknown and withhold any swap action; an
/// unknown rate is never zero.
pub trait LatestRate {
    type Error: std::error::Error + Send + Sync + 'static;

    fn latest_rate(&mut self) -> Result<RatePair, Self::Error>;
}
