/*
  pump_curve - bonding curve launches with graduation

   Price
   ^
   |                          graduation . . . . . . .
   |                        /|
   |                     /   |
   |                 /       |   external pool
   |           __/           |
   |_____----                |
   +-------------------------+------------> Tokens Sold

  Every token starts on a constant-product curve over virtual reserves.
  Buys push the price up, sells pull it down, and the trade that lifts the
  market cap past the configured threshold freezes the curve for good. The
  owner then migrates the raised SOL and the reserved supply to a pool.

  Launch -> Trade -> Graduate -> Migrate
*/

use anchor_lang::prelude::*;

pub mod constants;
pub mod curve;
pub mod errors;
pub mod events;
pub mod fees;
pub mod instructions;
pub mod state;

use curve::CurveConfig;
use fees::FeeSchedule;
use instructions::*;

declare_id!("2heQGapAziv2GeSwGhjoVWoWj2TmsJL5UTeJ4jG5JcSp");

#[program]
pub mod pump_curve {
    use super::*;

    pub fn init_protocol(
        ctx: Context<InitProtocol>,
        curve_config: CurveConfig,
        fee_schedule: FeeSchedule,
        platform_wallet: Pubkey,
        community_wallet: Pubkey,
        liquidity_wallet: Pubkey,
    ) -> Result<()> {
        ctx.accounts.init_protocol(
            curve_config,
            fee_schedule,
            platform_wallet,
            community_wallet,
            liquidity_wallet,
            ctx.bumps,
        )
    }

    pub fn launch_coin(
        ctx: Context<LaunchCoin>,
        name: String,
        symbol: String,
        uri: String,
    ) -> Result<()> {
        ctx.accounts.launch_coin(name, symbol, uri, ctx.bumps)
    }

    pub fn buy_token(
        ctx: Context<TradeCoin>,
        sol_amount: u64,
        expected_tokens_out: u64,
        slippage_bps: u16,
    ) -> Result<()> {
        ctx.accounts
            .buy_token(sol_amount, expected_tokens_out, slippage_bps)
    }

    pub fn sell_token(
        ctx: Context<TradeCoin>,
        token_amount: u64,
        expected_sol_out: u64,
        slippage_bps: u16,
    ) -> Result<()> {
        ctx.accounts
            .sell_token(token_amount, expected_sol_out, slippage_bps)
    }

    pub fn claim_creator_fees(ctx: Context<ClaimCreatorFees>) -> Result<()> {
        ctx.accounts.claim_creator_fees()
    }

    pub fn migrate_liquidity(ctx: Context<MigrateLiquidity>) -> Result<()> {
        ctx.accounts.migrate_liquidity()
    }
}
