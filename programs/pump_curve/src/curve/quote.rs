use anchor_lang::prelude::*;

use crate::constants::PRICE_SCALE;
use crate::curve::reserve_math::to_u64;
use crate::errors::CurveError;

/// SOL per whole token, fixed point scaled by [`PRICE_SCALE`].
///
/// Lamports and token base units both carry 9 decimals, so the reserve ratio
/// in base units is already SOL per token.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Price(u128);

impl Price {
    pub fn from_reserves(virtual_sol: u64, virtual_tokens: u64) -> Result<Self> {
        require!(virtual_tokens > 0, CurveError::InvalidState);
        let scaled = (virtual_sol as u128)
            .checked_mul(PRICE_SCALE)
            .ok_or(CurveError::MathOverflow)?
            / (virtual_tokens as u128);
        Ok(Self(scaled))
    }

    pub fn from_scaled(scaled: u128) -> Self {
        Self(scaled)
    }

    pub fn scaled(&self) -> u128 {
        self.0
    }

    /// Lossy, for display only.
    pub fn as_sol(&self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / PRICE_SCALE;
        let frac = self.0 % PRICE_SCALE;
        write!(f, "{}.{:018} SOL", whole, frac)
    }
}

/// Market cap in lamports implied by the reserve ratio applied to the whole
/// supply: `virtual_sol * total_supply / virtual_tokens`.
pub fn market_cap(virtual_sol: u64, virtual_tokens: u64, total_supply: u64) -> Result<u64> {
    require!(virtual_tokens > 0, CurveError::InvalidState);
    let cap = (virtual_sol as u128) * (total_supply as u128) / (virtual_tokens as u128);
    to_u64(cap)
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeSide {
    /// SOL in, tokens out
    Buy,
    /// Tokens in, SOL out
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

/// Result of pricing one trade against a curve state. Never stored.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeQuote {
    pub side: TradeSide,
    /// Lamports on a buy, token base units on a sell
    pub amount_in: u64,
    /// Token base units on a buy, lamports on a sell
    pub amount_out: u64,
    pub price_after: Price,
    /// Lamports
    pub market_cap_after: u64,
    pub virtual_sol_after: u64,
    pub virtual_tokens_after: u64,
}

impl TradeQuote {
    pub fn tokens_out(&self) -> Option<u64> {
        matches!(self.side, TradeSide::Buy).then_some(self.amount_out)
    }

    pub fn sol_out(&self) -> Option<u64> {
        matches!(self.side, TradeSide::Sell).then_some(self.amount_out)
    }
}
