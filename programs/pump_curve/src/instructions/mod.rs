pub mod claim_creator_fees;
pub mod init_protocol;
pub mod launch_coin;
pub mod migrate_liquidity;
pub mod trade_coin;

pub use claim_creator_fees::*;
pub use init_protocol::*;
pub use launch_coin::*;
pub use migrate_liquidity::*;
pub use trade_coin::*;

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::SEED_SOL_ESCROW;

/// Moves lamports out of a curve's SOL escrow, signing as the escrow PDA.
pub(crate) fn transfer_from_escrow<'info>(
    system_program: AccountInfo<'info>,
    sol_escrow: AccountInfo<'info>,
    to: AccountInfo<'info>,
    bonding_curve: &Pubkey,
    escrow_bump: u8,
    lamports: u64,
) -> Result<()> {
    if lamports == 0 {
        return Ok(());
    }
    let seeds = &[
        SEED_SOL_ESCROW.as_bytes(),
        bonding_curve.as_ref(),
        &[escrow_bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_ctx = CpiContext::new_with_signer(
        system_program,
        Transfer {
            from: sol_escrow,
            to,
        },
        signer_seeds,
    );
    transfer(cpi_ctx, lamports)
}
