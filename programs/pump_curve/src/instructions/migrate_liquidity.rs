use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::{SEED_BONDING_CURVE, SEED_GLOBAL_STATE, SEED_SOL_ESCROW};
use crate::errors::ProtocolError;
use crate::events::MigrationReady;
use crate::instructions::transfer_from_escrow;
use crate::state::{BondingCurve, GlobalState};

/// # Migrate Liquidity Instruction
///
/// Hands a graduated curve's assets to the protocol owner so they can seed an
/// external pool: every lamport the curve raised and every token it still
/// holds, including the supply reserved for migration. Unclaimed creator fees
/// and the escrow's rent floor stay behind.
///
/// Runs once per curve. The curve stays graduated afterwards and keeps
/// rejecting trades.
#[derive(Accounts)]
pub struct MigrateLiquidity<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [SEED_GLOBAL_STATE.as_bytes()],
        bump = global_state.bump,
        has_one = owner @ ProtocolError::NotOwner,
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        mut,
        seeds = [SEED_BONDING_CURVE.as_bytes(), token_mint.key().as_ref()],
        bump = bonding_curve.bump,
        has_one = token_mint,
    )]
    pub bonding_curve: Account<'info, BondingCurve>,

    #[account(
        mut,
        seeds = [SEED_SOL_ESCROW.as_bytes(), bonding_curve.key().as_ref()],
        bump = bonding_curve.escrow_bump,
    )]
    pub sol_escrow: SystemAccount<'info>,

    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = bonding_curve,
    )]
    pub bonding_curve_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = token_mint,
        associated_token::authority = owner,
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

impl<'info> MigrateLiquidity<'info> {
    pub fn migrate_liquidity(&mut self) -> Result<()> {
        require!(
            self.bonding_curve.curve.is_graduated,
            ProtocolError::NotGraduated
        );
        require!(!self.bonding_curve.migrated, ProtocolError::AlreadyMigrated);

        let rent_floor = Rent::get()?.minimum_balance(0);
        let sol_amount = self
            .sol_escrow
            .lamports()
            .saturating_sub(rent_floor)
            .saturating_sub(self.bonding_curve.creator_fees_pending);
        let token_amount = self.bonding_curve_token_account.amount;
        require!(
            sol_amount > 0 || token_amount > 0,
            ProtocolError::NothingToMigrate
        );

        transfer_from_escrow(
            self.system_program.to_account_info(),
            self.sol_escrow.to_account_info(),
            self.owner.to_account_info(),
            &self.bonding_curve.key(),
            self.bonding_curve.escrow_bump,
            sol_amount,
        )?;

        if token_amount > 0 {
            let token_mint_key = self.token_mint.key();
            let seeds = &[
                SEED_BONDING_CURVE.as_bytes(),
                token_mint_key.as_ref(),
                &[self.bonding_curve.bump],
            ];
            let signer_seeds = &[&seeds[..]];

            let cpi_ctx = CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.bonding_curve_token_account.to_account_info(),
                    to: self.owner_token_account.to_account_info(),
                    mint: self.token_mint.to_account_info(),
                    authority: self.bonding_curve.to_account_info(),
                },
                signer_seeds,
            );
            transfer_checked(cpi_ctx, token_amount, self.token_mint.decimals)?;
        }

        self.bonding_curve.migrated = true;

        msg!(
            "Migrating {} lamports and {} tokens",
            sol_amount,
            token_amount
        );

        emit!(MigrationReady {
            token_mint: self.token_mint.key(),
            recipient: self.owner.key(),
            sol_amount,
            token_amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
