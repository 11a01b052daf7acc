//! Signal generation — the weighted-vote strategy.

pub mod combined;

pub use combined::{generate_signals, CombinedSignal, SignalParams};
