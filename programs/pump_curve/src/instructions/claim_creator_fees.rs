use anchor_lang::prelude::*;

use crate::constants::{SEED_BONDING_CURVE, SEED_SOL_ESCROW};
use crate::errors::ProtocolError;
use crate::events::CreatorFeesClaimed;
use crate::instructions::transfer_from_escrow;
use crate::state::BondingCurve;

#[derive(Accounts)]
pub struct ClaimCreatorFees<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_BONDING_CURVE.as_bytes(), bonding_curve.token_mint.as_ref()],
        bump = bonding_curve.bump,
        has_one = creator @ ProtocolError::NotCreator,
    )]
    pub bonding_curve: Account<'info, BondingCurve>,

    #[account(
        mut,
        seeds = [SEED_SOL_ESCROW.as_bytes(), bonding_curve.key().as_ref()],
        bump = bonding_curve.escrow_bump,
    )]
    pub sol_escrow: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> ClaimCreatorFees<'info> {
    /// Pays out every creator fee accrued in the escrow since the last claim.
    /// Works in any phase, including after migration.
    pub fn claim_creator_fees(&mut self) -> Result<()> {
        let amount = self.bonding_curve.creator_fees_pending;
        require!(amount > 0, ProtocolError::NoFeesToClaim);

        transfer_from_escrow(
            self.system_program.to_account_info(),
            self.sol_escrow.to_account_info(),
            self.creator.to_account_info(),
            &self.bonding_curve.key(),
            self.bonding_curve.escrow_bump,
            amount,
        )?;
        self.bonding_curve.creator_fees_pending = 0;

        msg!("Creator claimed {} lamports", amount);

        emit!(CreatorFeesClaimed {
            token_mint: self.bonding_curve.token_mint,
            creator: self.creator.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
