use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::{SEED_BONDING_CURVE, SEED_GLOBAL_STATE, SEED_SOL_ESCROW};
use crate::curve::{check_slippage, CurveState, TradeQuote};
use crate::errors::CurveError;
use crate::events::{CurveGraduated, TradeExecuted};
use crate::fees::FeeSplit;
use crate::instructions::transfer_from_escrow;
use crate::state::{BondingCurve, GlobalState};

#[derive(Accounts)]
pub struct TradeCoin<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = token_mint,
        associated_token::authority = trader,
    )]
    pub trader_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SEED_SOL_ESCROW.as_bytes(), bonding_curve.key().as_ref()],
        bump = bonding_curve.escrow_bump,
    )]
    pub sol_escrow: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [SEED_BONDING_CURVE.as_bytes(), token_mint.key().as_ref()],
        bump = bonding_curve.bump,
        has_one = token_mint,
    )]
    pub bonding_curve: Account<'info, BondingCurve>,

    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = bonding_curve,
    )]
    pub bonding_curve_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        seeds = [SEED_GLOBAL_STATE.as_bytes()],
        bump = global_state.bump,
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(mut, address = global_state.platform_wallet)]
    pub platform_wallet: SystemAccount<'info>,

    #[account(mut, address = global_state.community_wallet)]
    pub community_wallet: SystemAccount<'info>,

    #[account(mut, address = global_state.liquidity_wallet)]
    pub liquidity_wallet: SystemAccount<'info>,

    pub token_mint: InterfaceAccount<'info, Mint>,
    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

impl<'info> TradeCoin<'info> {
    /// Spends `sol_amount` lamports, fees included, on tokens from the curve.
    ///
    /// Fees come off the top; the remainder is what the curve prices. The
    /// creator's share stays in the escrow until claimed. Fails with
    /// `SlippageExceeded` if the curve pays out more than `slippage_bps` below
    /// `expected_tokens_out`.
    pub fn buy_token(
        &mut self,
        sol_amount: u64,
        expected_tokens_out: u64,
        slippage_bps: u16,
    ) -> Result<()> {
        let fees = self.global_state.fee_schedule.split(sol_amount)?;
        let sol_in = sol_amount
            .checked_sub(fees.total()?)
            .ok_or(CurveError::MathOverflow)?;

        let engine = self.bonding_curve.engine()?;
        let (next, quote) = engine.apply_buy_with_slippage(
            &self.bonding_curve.curve,
            sol_in,
            expected_tokens_out,
            slippage_bps,
        )?;

        let escrow_in = sol_in
            .checked_add(fees.creator)
            .ok_or(CurveError::MathOverflow)?;
        self.pay_from_trader(self.sol_escrow.to_account_info(), escrow_in)?;
        self.pay_from_trader(self.platform_wallet.to_account_info(), fees.platform)?;
        self.pay_from_trader(self.community_wallet.to_account_info(), fees.community)?;
        self.pay_from_trader(self.liquidity_wallet.to_account_info(), fees.liquidity)?;

        let token_mint_key = self.token_mint.key();
        let seeds = &[
            SEED_BONDING_CURVE.as_bytes(),
            token_mint_key.as_ref(),
            &[self.bonding_curve.bump],
        ];
        let signer_seeds = &[&seeds[..]];

        let accounts = TransferChecked {
            from: self.bonding_curve_token_account.to_account_info(),
            to: self.trader_token_account.to_account_info(),
            mint: self.token_mint.to_account_info(),
            authority: self.bonding_curve.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            accounts,
            signer_seeds,
        );
        transfer_checked(cpi_ctx, quote.amount_out, self.token_mint.decimals)?;

        self.settle(next, &quote, &fees, sol_amount, quote.amount_out)
    }

    /// Sells `token_amount` tokens back to the curve. Slippage is checked
    /// against the SOL the trader actually receives, after fees.
    pub fn sell_token(
        &mut self,
        token_amount: u64,
        expected_sol_out: u64,
        slippage_bps: u16,
    ) -> Result<()> {
        let engine = self.bonding_curve.engine()?;
        let (next, quote) = engine.apply_sell(&self.bonding_curve.curve, token_amount)?;

        let fees = self.global_state.fee_schedule.split(quote.amount_out)?;
        let sol_out = quote
            .amount_out
            .checked_sub(fees.total()?)
            .ok_or(CurveError::MathOverflow)?;
        check_slippage(expected_sol_out, sol_out, slippage_bps)?;
        require!(sol_out > 0, CurveError::InvalidAmount);

        let accounts = TransferChecked {
            from: self.trader_token_account.to_account_info(),
            to: self.bonding_curve_token_account.to_account_info(),
            mint: self.token_mint.to_account_info(),
            authority: self.trader.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), accounts);
        transfer_checked(cpi_ctx, token_amount, self.token_mint.decimals)?;

        self.pay_from_escrow(self.trader.to_account_info(), sol_out)?;
        self.pay_from_escrow(self.platform_wallet.to_account_info(), fees.platform)?;
        self.pay_from_escrow(self.community_wallet.to_account_info(), fees.community)?;
        self.pay_from_escrow(self.liquidity_wallet.to_account_info(), fees.liquidity)?;

        self.settle(next, &quote, &fees, token_amount, sol_out)
    }

    fn pay_from_trader(&self, to: AccountInfo<'info>, lamports: u64) -> Result<()> {
        if lamports == 0 {
            return Ok(());
        }
        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.trader.to_account_info(),
                to,
            },
        );
        transfer(cpi_ctx, lamports)
    }

    fn pay_from_escrow(&self, to: AccountInfo<'info>, lamports: u64) -> Result<()> {
        transfer_from_escrow(
            self.system_program.to_account_info(),
            self.sol_escrow.to_account_info(),
            to,
            &self.bonding_curve.key(),
            self.bonding_curve.escrow_bump,
            lamports,
        )
    }

    // Persists the engine's next state and fee accounting, then emits events.
    fn settle(
        &mut self,
        next: CurveState,
        quote: &TradeQuote,
        fees: &FeeSplit,
        amount_in: u64,
        amount_out: u64,
    ) -> Result<()> {
        let trader = self.trader.key();
        let token_mint = self.token_mint.key();
        let fee_total = fees.total()?;
        let bonding_curve = &mut self.bonding_curve;

        bonding_curve.creator_fees_pending = bonding_curve
            .creator_fees_pending
            .checked_add(fees.creator)
            .ok_or(CurveError::MathOverflow)?;
        bonding_curve.total_fees_collected = bonding_curve
            .total_fees_collected
            .checked_add(fee_total)
            .ok_or(CurveError::MathOverflow)?;
        let graduated_now = bonding_curve.commit(next);

        let timestamp = Clock::get()?.unix_timestamp;

        emit!(TradeExecuted {
            token_mint,
            trader,
            side: quote.side,
            amount_in,
            amount_out,
            fee_total,
            creator_fee: fees.creator,
            price_after: quote.price_after.scaled(),
            market_cap_after: quote.market_cap_after,
            sol_raised: bonding_curve.curve.sol_raised,
            tokens_sold: bonding_curve.curve.tokens_sold,
            version: bonding_curve.version,
            timestamp,
        });

        if graduated_now {
            msg!(
                "Curve graduated at {} lamports market cap",
                quote.market_cap_after
            );
            emit!(CurveGraduated {
                token_mint,
                market_cap: quote.market_cap_after,
                sol_raised: bonding_curve.curve.sol_raised,
                tokens_sold: bonding_curve.curve.tokens_sold,
                timestamp,
            });
        }

        Ok(())
    }
}
