//! Services layered over the pure ledger computations.

pub mod services;
pub mod utils;
