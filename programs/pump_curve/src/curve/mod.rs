//! Bonding curve pricing. Pure arithmetic over plain values; the instruction
//! handlers load accounts, call into [`CurveEngine`], and persist the result.

pub mod config;
pub mod engine;
pub mod quote;
pub mod reserve_math;
pub mod state;

pub use config::*;
pub use engine::*;
pub use quote::*;
pub use state::*;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::errors::CurveError;

    pub(crate) fn curve_err(e: CurveError) -> anchor_lang::error::Error {
        e.into()
    }
}
