use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2,
        mpl_token_metadata::ID as METAPLEX_ID, CreateMetadataAccountsV3, Metadata as Metaplex,
    },
    token_interface::{mint_to, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::constants::{SEED_BONDING_CURVE, SEED_GLOBAL_STATE, SEED_SOL_ESCROW, TOKEN_DECIMALS};
use crate::curve::CurveState;
use crate::events::LaunchTokens;
use crate::state::{BondingCurve, GlobalState};

/// # LaunchCoin Instruction
///
/// Creates a new SPL token with metadata, mints its whole supply into a token
/// account owned by a fresh bonding curve, and freezes the protocol's current
/// curve config into that curve. Every launch prices from the same starting
/// point; later config changes only affect later launches.
#[derive(Accounts)]
pub struct LaunchCoin<'info> {
    /// Pays for every account created here and is recorded as the creator
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_GLOBAL_STATE.as_bytes()],
        bump = global_state.bump,
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(init,
    payer = creator,
    space = 8 + BondingCurve::INIT_SPACE,
    seeds = [SEED_BONDING_CURVE.as_bytes(), token_mint.key().as_ref()],
    bump,
    )]
    pub bonding_curve: Account<'info, BondingCurve>,

    /// Holds the SOL raised by the curve plus unclaimed creator fees
    #[account(
        mut,
        seeds = [SEED_SOL_ESCROW.as_bytes(), bonding_curve.key().as_ref()],
        bump,
    )]
    pub sol_escrow: SystemAccount<'info>,

    /// The bonding curve is both mint and freeze authority
    #[account(
        init,
        payer = creator,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = bonding_curve,
        mint::freeze_authority = bonding_curve,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: created and validated by the metadata program
    #[account(
        mut,
        seeds = [b"metadata", METAPLEX_ID.as_ref(), token_mint.key().as_ref()],
        seeds::program = token_metadata_program.key(),
        bump,
    )]
    pub metadata: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = token_mint,
        associated_token::authority = bonding_curve,
    )]
    pub bonding_curve_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,

    #[account(address = METAPLEX_ID)]
    pub token_metadata_program: Program<'info, Metaplex>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,

    pub rent: Sysvar<'info, Rent>,
}

impl<'info> LaunchCoin<'info> {
    /// Launches a new token on a bonding curve
    ///
    /// 1. Creates token metadata with the provided name, symbol, and URI
    /// 2. Mints the configured total supply to the bonding curve's token account
    /// 3. Funds the SOL escrow up to its rent-exempt minimum
    /// 4. Initializes the bonding curve from the global config
    /// 5. Emits [`LaunchTokens`]
    pub fn launch_coin(
        &mut self,
        name: String,
        symbol: String,
        uri: String,
        bumps: LaunchCoinBumps,
    ) -> Result<()> {
        let config = self.global_state.curve_config;
        config.validate()?;

        let token_data = DataV2 {
            name,
            symbol,
            uri,
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        };

        let token_mint_key = self.token_mint.key();
        let seeds = &[
            SEED_BONDING_CURVE.as_bytes(),
            token_mint_key.as_ref(),
            &[bumps.bonding_curve],
        ];
        let signer = &[&seeds[..]];

        let metadata_ctx = CpiContext::new_with_signer(
            self.token_metadata_program.to_account_info(),
            CreateMetadataAccountsV3 {
                metadata: self.metadata.to_account_info(),
                mint: self.token_mint.to_account_info(),
                mint_authority: self.bonding_curve.to_account_info(),
                update_authority: self.bonding_curve.to_account_info(),
                payer: self.creator.to_account_info(),
                system_program: self.system_program.to_account_info(),
                rent: self.rent.to_account_info(),
            },
            signer,
        );

        // immutable, update authority signs
        create_metadata_accounts_v3(metadata_ctx, token_data, false, true, None)?;

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.token_mint.to_account_info(),
                    to: self.bonding_curve_token_account.to_account_info(),
                    authority: self.bonding_curve.to_account_info(),
                },
                signer,
            ),
            config.total_supply,
        )?;

        // The escrow is a bare system account; it must stay rent exempt once
        // it starts paying out.
        let rent_floor = Rent::get()?.minimum_balance(0);
        let top_up = rent_floor.saturating_sub(self.sol_escrow.lamports());
        if top_up > 0 {
            transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.creator.to_account_info(),
                        to: self.sol_escrow.to_account_info(),
                    },
                ),
                top_up,
            )?;
        }

        self.bonding_curve.set_inner(BondingCurve {
            token_mint: token_mint_key,
            creator: self.creator.key(),
            config,
            curve: CurveState::new(),
            creator_fees_pending: 0,
            total_fees_collected: 0,
            version: 0,
            migrated: false,
            bump: bumps.bonding_curve,
            escrow_bump: bumps.sol_escrow,
        });

        self.global_state.tokens_launched = self.global_state.tokens_launched.saturating_add(1);

        msg!("Launching coin {}", token_mint_key);

        emit!(LaunchTokens {
            token_mint: token_mint_key,
            bonding_curve: self.bonding_curve.key(),
            creator: self.creator.key(),
            virtual_sol_reserves: config.virtual_sol_reserves,
            virtual_token_reserves: config.virtual_token_reserves,
            total_tokens_minted: config.total_supply,
            graduation_market_cap: config.graduation_market_cap,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
