use anchor_lang::prelude::*;

use crate::constants::SEED_GLOBAL_STATE;
use crate::curve::CurveConfig;
use crate::events::ProtocolInitialized;
use crate::fees::FeeSchedule;
use crate::state::GlobalState;

#[derive(Accounts)]
pub struct InitProtocol<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(init,
    payer = payer,
    space = 8 + GlobalState::INIT_SPACE,
    seeds = [SEED_GLOBAL_STATE.as_bytes()],
    bump,
    )]
    pub global_state: Account<'info, GlobalState>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitProtocol<'info> {
    pub fn init_protocol(
        &mut self,
        curve_config: CurveConfig,
        fee_schedule: FeeSchedule,
        platform_wallet: Pubkey,
        community_wallet: Pubkey,
        liquidity_wallet: Pubkey,
        bumps: InitProtocolBumps,
    ) -> Result<()> {
        curve_config.validate()?;
        fee_schedule.validate()?;

        self.global_state.set_inner(GlobalState {
            owner: self.payer.key(),
            platform_wallet,
            community_wallet,
            liquidity_wallet,
            curve_config,
            fee_schedule,
            tokens_launched: 0,
            bump: bumps.global_state,
        });

        msg!(
            "Protocol initialized, graduation at {} lamports market cap",
            curve_config.graduation_market_cap
        );

        emit!(ProtocolInitialized {
            owner: self.payer.key(),
            curve_config,
            fee_schedule,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
