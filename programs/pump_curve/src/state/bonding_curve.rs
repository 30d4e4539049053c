use anchor_lang::prelude::*;

use crate::curve::{CurveConfig, CurveEngine, CurveState};

#[account]
#[derive(InitSpace)]
pub struct BondingCurve {
    pub token_mint: Pubkey,
    pub creator: Pubkey,
    // frozen at launch
    pub config: CurveConfig,
    pub curve: CurveState,
    /// Creator share of trading fees held in the SOL escrow until claimed
    pub creator_fees_pending: u64,
    pub total_fees_collected: u64,
    /// Bumped on every trade. Clients compare it against the value their quote
    /// was taken at to spot a stale quote before sending.
    pub version: u64,
    pub migrated: bool,
    pub bump: u8,
    pub escrow_bump: u8,
}

impl BondingCurve {
    pub fn engine(&self) -> Result<CurveEngine> {
        CurveEngine::new(self.config)
    }

    /// Stores a state returned by the engine. Returns true when this write is
    /// the one that graduated the curve.
    pub fn commit(&mut self, next: CurveState) -> bool {
        let graduated_now = !self.curve.is_graduated && next.is_graduated;
        // Graduation is one-way
        self.curve = CurveState {
            is_graduated: self.curve.is_graduated || next.is_graduated,
            ..next
        };
        self.version = self.version.wrapping_add(1);
        graduated_now
    }
}
