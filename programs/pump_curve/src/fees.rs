use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, MAX_TOTAL_FEE_BPS};
use crate::errors::{CurveError, ProtocolError};

/// Trading fee rates in basis points, charged on the SOL leg of every trade.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct FeeSchedule {
    pub platform_bps: u16,
    pub creator_bps: u16,
    pub community_bps: u16,
    pub liquidity_bps: u16,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        // 1% platform, 0.7% creator, 0.2% community, 0.1% liquidity
        Self {
            platform_bps: 100,
            creator_bps: 70,
            community_bps: 20,
            liquidity_bps: 10,
        }
    }
}

impl FeeSchedule {
    pub fn total_bps(&self) -> u32 {
        self.platform_bps as u32
            + self.creator_bps as u32
            + self.community_bps as u32
            + self.liquidity_bps as u32
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.total_bps() <= MAX_TOTAL_FEE_BPS as u32,
            ProtocolError::FeeTooHigh
        );
        Ok(())
    }

    /// Splits the fee owed on `amount` lamports. Each share rounds down on its
    /// own, so the total never exceeds the schedule's combined rate.
    pub fn split(&self, amount: u64) -> Result<FeeSplit> {
        Ok(FeeSplit {
            platform: share(amount, self.platform_bps)?,
            creator: share(amount, self.creator_bps)?,
            community: share(amount, self.community_bps)?,
            liquidity: share(amount, self.liquidity_bps)?,
        })
    }
}

fn share(amount: u64, bps: u16) -> Result<u64> {
    let v = (amount as u128) * (bps as u128) / (BPS_DENOMINATOR as u128);
    u64::try_from(v).map_err(|_| CurveError::MathOverflow.into())
}

/// Lamports owed to each fee recipient for one trade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub platform: u64,
    pub creator: u64,
    pub community: u64,
    pub liquidity: u64,
}

impl FeeSplit {
    pub fn total(&self) -> Result<u64> {
        self.platform
            .checked_add(self.creator)
            .and_then(|v| v.checked_add(self.community))
            .and_then(|v| v.checked_add(self.liquidity))
            .ok_or(CurveError::MathOverflow.into())
    }
}
