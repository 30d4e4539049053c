use anchor_lang::prelude::*;

use crate::curve::{CurveConfig, TradeSide};
use crate::fees::FeeSchedule;

#[event]
pub struct ProtocolInitialized {
    pub owner: Pubkey,
    pub curve_config: CurveConfig,
    pub fee_schedule: FeeSchedule,
    pub timestamp: i64,
}

/// Event emitted when a new token is launched
///
/// Carries the curve parameters the token was frozen with, so indexers can
/// price the curve without reading the global state.
#[event]
pub struct LaunchTokens {
    pub token_mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub creator: Pubkey,
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
    pub total_tokens_minted: u64,
    pub graduation_market_cap: u64,
    pub timestamp: i64,
}

#[event]
pub struct TradeExecuted {
    pub token_mint: Pubkey,
    pub trader: Pubkey,
    pub side: TradeSide,
    /// Lamports paid in on a buy (before fees), tokens paid in on a sell
    pub amount_in: u64,
    /// Tokens paid out on a buy, lamports paid out on a sell (after fees)
    pub amount_out: u64,
    pub fee_total: u64,
    pub creator_fee: u64,
    /// SOL per whole token, scaled by 1e18
    pub price_after: u128,
    pub market_cap_after: u64,
    pub sol_raised: u64,
    pub tokens_sold: u64,
    pub version: u64,
    pub timestamp: i64,
}

#[event]
pub struct CurveGraduated {
    pub token_mint: Pubkey,
    pub market_cap: u64,
    pub sol_raised: u64,
    pub tokens_sold: u64,
    pub timestamp: i64,
}

#[event]
pub struct CreatorFeesClaimed {
    pub token_mint: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct MigrationReady {
    pub token_mint: Pubkey,
    pub recipient: Pubkey,
    pub sol_amount: u64,
    pub token_amount: u64,
    pub timestamp: i64,
}
