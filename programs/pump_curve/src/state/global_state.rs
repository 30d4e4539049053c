use anchor_lang::prelude::*;

use crate::curve::CurveConfig;
use crate::fees::FeeSchedule;

/// Protocol-wide settings. New launches snapshot `curve_config`, so changing
/// it never reprices a live curve.
#[account]
#[derive(InitSpace)]
pub struct GlobalState {
    pub owner: Pubkey,
    pub platform_wallet: Pubkey,
    pub community_wallet: Pubkey,
    pub liquidity_wallet: Pubkey,
    pub curve_config: CurveConfig,
    pub fee_schedule: FeeSchedule,
    pub tokens_launched: u64,
    pub bump: u8,
}
