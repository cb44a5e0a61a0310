//! Contract payoffs.
//!
//! Only the European call is needed: the hedged liability is settled on the
//! terminal price of each simulated path.

pub mod payoff;

pub use payoff::{european_call_payoff, european_call_payoff_scalar};
