use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::curve::config::CurveConfig;
use crate::curve::quote::{market_cap, Price, TradeQuote, TradeSide};
use crate::curve::reserve_math;
use crate::curve::state::CurveState;
use crate::errors::CurveError;

/// Prices trades against a [`CurveState`] and produces the next state.
///
/// The engine owns a validated config and nothing else: every call takes the
/// current state by reference and returns new values, so one engine can be
/// shared freely across threads. It performs no I/O and never logs; callers
/// persist the returned state and move funds themselves. A caller that loses
/// a write race must reload the state and price again, since a quote is only
/// valid for the exact state it was computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveEngine {
    config: CurveConfig,
}

impl CurveEngine {
    pub fn new(config: CurveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Prices a buy of `sol_in` lamports without touching `state`.
    pub fn quote_buy(&self, state: &CurveState, sol_in: u64) -> Result<TradeQuote> {
        require!(!state.is_graduated, CurveError::AlreadyGraduated);
        require!(sol_in > 0, CurveError::InvalidAmount);
        state.validate(&self.config)?;

        let (virtual_sol, virtual_tokens) = state.virtual_reserves(&self.config)?;
        let swap = reserve_math::buy(sol_in, virtual_sol, virtual_tokens)?;

        // Virtual reserves alone do not stop sales past the real inventory
        require!(
            swap.amount_out <= state.tokens_remaining(&self.config),
            CurveError::InsufficientSupply
        );

        self.quote(TradeSide::Buy, sol_in, swap)
    }

    /// Prices a sell of `tokens_in` base units without touching `state`.
    pub fn quote_sell(&self, state: &CurveState, tokens_in: u64) -> Result<TradeQuote> {
        require!(!state.is_graduated, CurveError::AlreadyGraduated);
        require!(tokens_in > 0, CurveError::InvalidAmount);
        require!(
            tokens_in <= state.tokens_sold,
            CurveError::InsufficientBalance
        );
        state.validate(&self.config)?;

        let (virtual_sol, virtual_tokens) = state.virtual_reserves(&self.config)?;
        let swap = reserve_math::sell(tokens_in, virtual_sol, virtual_tokens)?;

        self.quote(TradeSide::Sell, tokens_in, swap)
    }

    /// Applies a buy and returns the next state with its receipt. The state
    /// graduates on the trade whose market cap reaches the threshold.
    pub fn apply_buy(&self, state: &CurveState, sol_in: u64) -> Result<(CurveState, TradeQuote)> {
        let quote = self.quote_buy(state, sol_in)?;

        let next = CurveState {
            sol_raised: state
                .sol_raised
                .checked_add(sol_in)
                .ok_or(CurveError::MathOverflow)?,
            tokens_sold: state
                .tokens_sold
                .checked_add(quote.amount_out)
                .ok_or(CurveError::MathOverflow)?,
            is_graduated: quote.market_cap_after >= self.config.graduation_market_cap,
        };

        Ok((next, quote))
    }

    /// Applies a sell. Selling lowers the market cap, so it never graduates.
    pub fn apply_sell(
        &self,
        state: &CurveState,
        tokens_in: u64,
    ) -> Result<(CurveState, TradeQuote)> {
        let quote = self.quote_sell(state, tokens_in)?;

        let next = CurveState {
            sol_raised: state.sol_raised.saturating_sub(quote.amount_out),
            tokens_sold: state
                .tokens_sold
                .checked_sub(tokens_in)
                .ok_or(CurveError::InsufficientBalance)?,
            is_graduated: false,
        };

        Ok((next, quote))
    }

    /// [`Self::apply_buy`] guarded by a caller-supplied expectation, usually a
    /// quote the user saw before signing.
    pub fn apply_buy_with_slippage(
        &self,
        state: &CurveState,
        sol_in: u64,
        expected_tokens_out: u64,
        tolerance_bps: u16,
    ) -> Result<(CurveState, TradeQuote)> {
        let (next, quote) = self.apply_buy(state, sol_in)?;
        check_slippage(expected_tokens_out, quote.amount_out, tolerance_bps)?;
        Ok((next, quote))
    }

    pub fn apply_sell_with_slippage(
        &self,
        state: &CurveState,
        tokens_in: u64,
        expected_sol_out: u64,
        tolerance_bps: u16,
    ) -> Result<(CurveState, TradeQuote)> {
        let (next, quote) = self.apply_sell(state, tokens_in)?;
        check_slippage(expected_sol_out, quote.amount_out, tolerance_bps)?;
        Ok((next, quote))
    }

    fn quote(
        &self,
        side: TradeSide,
        amount_in: u64,
        swap: reserve_math::ReserveSwap,
    ) -> Result<TradeQuote> {
        Ok(TradeQuote {
            side,
            amount_in,
            amount_out: swap.amount_out,
            price_after: Price::from_reserves(swap.new_virtual_sol, swap.new_virtual_tokens)?,
            market_cap_after: market_cap(
                swap.new_virtual_sol,
                swap.new_virtual_tokens,
                self.config.total_supply,
            )?,
            virtual_sol_after: swap.new_virtual_sol,
            virtual_tokens_after: swap.new_virtual_tokens,
        })
    }
}

/// Fails with `SlippageExceeded` when `actual` falls more than
/// `tolerance_bps` below `expected`. Better-than-expected fills pass.
pub fn check_slippage(expected: u64, actual: u64, tolerance_bps: u16) -> Result<()> {
    require!(
        (tolerance_bps as u64) <= BPS_DENOMINATOR,
        CurveError::InvalidTolerance
    );
    let min_out = (expected as u128) * ((BPS_DENOMINATOR - tolerance_bps as u64) as u128)
        / BPS_DENOMINATOR as u128;
    require!(actual as u128 >= min_out, CurveError::SlippageExceeded);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::curve::test_support::curve_err;

    const SOL: u64 = 1_000_000_000;

    fn engine() -> CurveEngine {
        CurveEngine::new(CurveConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = CurveConfig {
            total_supply: 0,
            ..CurveConfig::default()
        };
        assert_eq!(
            CurveEngine::new(config).unwrap_err(),
            curve_err(CurveError::InvalidConfig)
        );
    }

    #[test]
    fn test_fresh_buy_of_one_sol() {
        let engine = engine();
        let state = CurveState::new();

        let (next, quote) = engine.apply_buy(&state, SOL).unwrap();

        assert_eq!(quote.side, TradeSide::Buy);
        assert_eq!(quote.amount_out, 34_612_903_225_806_451);
        assert_eq!(quote.tokens_out(), Some(34_612_903_225_806_451));
        assert_eq!(quote.price_after.scaled(), 29_853_991_922);
        assert_eq!(quote.market_cap_after, 29_853_991_922);
        assert_eq!(next.sol_raised, SOL);
        assert_eq!(next.tokens_sold, 34_612_903_225_806_451);
        assert!(!next.is_graduated);

        // Receipt reserves are the reserves the next call will derive
        assert_eq!(
            next.virtual_reserves(engine.config()).unwrap(),
            (quote.virtual_sol_after, quote.virtual_tokens_after)
        );
    }

    #[test]
    fn test_quote_buy_is_pure() {
        let engine = engine();
        let state = CurveState {
            sol_raised: 3 * SOL,
            tokens_sold: 96_000_000 * TOKEN_UNIT,
            is_graduated: false,
        };
        let first = engine.quote_buy(&state, SOL / 3).unwrap();
        let second = engine.quote_buy(&state, SOL / 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(state.sol_raised, 3 * SOL);
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let engine = engine();
        let state = CurveState::new();
        assert_eq!(
            engine.quote_buy(&state, 0).unwrap_err(),
            curve_err(CurveError::InvalidAmount)
        );
        assert_eq!(
            engine.apply_sell(&state, 0).unwrap_err(),
            curve_err(CurveError::InvalidAmount)
        );
    }

    #[test]
    fn test_sell_more_than_sold_fails() {
        let engine = engine();
        let (state, _) = engine.apply_buy(&CurveState::new(), SOL).unwrap();

        let err = engine.apply_sell(&state, state.tokens_sold + 1).unwrap_err();
        assert_eq!(err, curve_err(CurveError::InsufficientBalance));
        assert_eq!(state.sol_raised, SOL);
    }

    #[test]
    fn test_sell_everything_returns_less_than_paid() {
        let engine = engine();
        let (bought, buy) = engine.apply_buy(&CurveState::new(), 2 * SOL).unwrap();
        let (sold, sell) = engine.apply_sell(&bought, buy.amount_out).unwrap();

        assert_eq!(sell.side, TradeSide::Sell);
        assert!(sell.amount_out < 2 * SOL);
        assert_eq!(sold.tokens_sold, 0);
        assert_eq!(sold.sol_raised, 2 * SOL - sell.amount_out);
        assert!(!sold.is_graduated);
    }

    #[test]
    fn test_buy_past_curve_supply_fails() {
        let engine = engine();
        // 200 SOL would release ~938M tokens from a fresh curve
        let err = engine.quote_buy(&CurveState::new(), 200 * SOL).unwrap_err();
        assert_eq!(err, curve_err(CurveError::InsufficientSupply));
    }

    #[test]
    fn test_graduation_flips_on_crossing_trade() {
        let config = CurveConfig {
            graduation_market_cap: 40 * SOL,
            ..CurveConfig::default()
        };
        let engine = CurveEngine::new(config).unwrap();

        let mut state = CurveState::new();
        let mut trades = 0;
        while !state.is_graduated {
            let before = state.market_cap(engine.config()).unwrap();
            assert!(before < 40 * SOL);
            let (next, quote) = engine.apply_buy(&state, SOL / 2).unwrap();
            assert_eq!(next.is_graduated, quote.market_cap_after >= 40 * SOL);
            state = next;
            trades += 1;
        }
        assert!(trades > 1);
        assert!(state.market_cap(engine.config()).unwrap() >= 40 * SOL);
    }

    #[test]
    fn test_graduated_state_rejects_all_trades() {
        let config = CurveConfig {
            graduation_market_cap: 29 * SOL,
            ..CurveConfig::default()
        };
        let engine = CurveEngine::new(config).unwrap();
        let (state, _) = engine.apply_buy(&CurveState::new(), 2 * SOL).unwrap();
        assert!(state.is_graduated);

        assert_eq!(
            engine.apply_buy(&state, SOL).unwrap_err(),
            curve_err(CurveError::AlreadyGraduated)
        );
        assert_eq!(
            engine.apply_sell(&state, 1).unwrap_err(),
            curve_err(CurveError::AlreadyGraduated)
        );
    }

    #[test]
    fn test_sell_clamps_sol_raised_at_zero() {
        let engine = engine();
        // Externally loaded record whose SOL ledger lags its token ledger
        let state = CurveState {
            sol_raised: 10,
            tokens_sold: 10_000_000 * TOKEN_UNIT,
            is_graduated: false,
        };
        let (next, quote) = engine.apply_sell(&state, 10_000_000 * TOKEN_UNIT).unwrap();
        assert!(quote.amount_out > 10);
        assert_eq!(next.sol_raised, 0);
        assert_eq!(next.tokens_sold, 0);
    }

    #[test]
    fn test_slippage_guard() {
        let engine = engine();
        let state = CurveState::new();
        let quoted = engine.quote_buy(&state, SOL).unwrap().amount_out;

        assert!(engine
            .apply_buy_with_slippage(&state, SOL, quoted, DEFAULT_SLIPPAGE_BPS)
            .is_ok());

        // Expectation 10% above what the curve pays is outside 5%
        let greedy = quoted + quoted / 10;
        assert_eq!(
            engine
                .apply_buy_with_slippage(&state, SOL, greedy, DEFAULT_SLIPPAGE_BPS)
                .unwrap_err(),
            curve_err(CurveError::SlippageExceeded)
        );
    }

    #[test]
    fn test_sell_slippage_guard() {
        let engine = engine();
        let (state, buy) = engine.apply_buy(&CurveState::new(), SOL).unwrap();
        assert_eq!(
            engine
                .apply_sell_with_slippage(&state, buy.amount_out, 2 * SOL, 500)
                .unwrap_err(),
            curve_err(CurveError::SlippageExceeded)
        );
        assert!(engine
            .apply_sell_with_slippage(&state, buy.amount_out, SOL, 500)
            .is_ok());
    }

    #[test]
    fn test_check_slippage_bounds() {
        assert!(check_slippage(1_000, 950, 500).is_ok());
        assert!(check_slippage(1_000, 949, 500).is_err());
        assert!(check_slippage(1_000, 2_000, 0).is_ok());
        assert!(check_slippage(0, 0, 0).is_ok());
        assert_eq!(
            check_slippage(1, 1, 10_001).unwrap_err(),
            curve_err(CurveError::InvalidTolerance)
        );
    }

    #[test]
    fn test_corrupt_state_rejected() {
        let engine = engine();
        let state = CurveState {
            tokens_sold: DEFAULT_BONDING_CURVE_SUPPLY + 1,
            ..CurveState::new()
        };
        assert_eq!(
            engine.quote_buy(&state, SOL).unwrap_err(),
            curve_err(CurveError::InvalidState)
        );
    }
}
