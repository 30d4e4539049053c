use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::curve::config::CurveConfig;
use crate::curve::quote::{market_cap, Price};
use crate::errors::CurveError;

/// Lifecycle of a curve. `Graduated` is terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurvePhase {
    Active,
    Graduated,
}

/// Per-token ledger. Mutated only by the engine's `apply_*` calls, which hand
/// back a new value instead of writing in place.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct CurveState {
    /// Lamports collected by the curve, net of sells
    pub sol_raised: u64,
    /// Token base units distributed, net of sells
    pub tokens_sold: u64,
    pub is_graduated: bool,
}

impl CurveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CurvePhase {
        if self.is_graduated {
            CurvePhase::Graduated
        } else {
            CurvePhase::Active
        }
    }

    /// `(virtual_sol, virtual_tokens)` as seen by the constant-product math.
    pub fn virtual_reserves(&self, config: &CurveConfig) -> Result<(u64, u64)> {
        let virtual_sol = config
            .virtual_sol_reserves
            .checked_add(self.sol_raised)
            .ok_or(CurveError::MathOverflow)?;
        let virtual_tokens = config
            .virtual_token_reserves
            .checked_sub(self.tokens_sold)
            .ok_or(CurveError::InvalidState)?;
        require!(virtual_sol > 0 && virtual_tokens > 0, CurveError::InvalidState);
        Ok((virtual_sol, virtual_tokens))
    }

    /// Rejects states that could not have been produced by the engine under
    /// `config`, e.g. a corrupted or hand-edited record.
    pub fn validate(&self, config: &CurveConfig) -> Result<()> {
        require!(
            self.tokens_sold <= config.bonding_curve_supply,
            CurveError::InvalidState
        );
        self.virtual_reserves(config).map(|_| ())
    }

    pub fn tokens_remaining(&self, config: &CurveConfig) -> u64 {
        config.bonding_curve_supply.saturating_sub(self.tokens_sold)
    }

    pub fn price(&self, config: &CurveConfig) -> Result<Price> {
        let (virtual_sol, virtual_tokens) = self.virtual_reserves(config)?;
        Price::from_reserves(virtual_sol, virtual_tokens)
    }

    /// Lamports.
    pub fn market_cap(&self, config: &CurveConfig) -> Result<u64> {
        let (virtual_sol, virtual_tokens) = self.virtual_reserves(config)?;
        market_cap(virtual_sol, virtual_tokens, config.total_supply)
    }

    /// Share of the curve supply already sold, in basis points.
    /// Views take the config as given, so an unvalidated zero supply reads as
    /// no progress rather than dividing by zero.
    pub fn progress_bps(&self, config: &CurveConfig) -> u16 {
        let sold = self.tokens_sold.min(config.bonding_curve_supply) as u128;
        (sold * BPS_DENOMINATOR as u128)
            .checked_div(config.bonding_curve_supply as u128)
            .map_or(0, |bps| bps as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::curve::test_support::curve_err;

    #[test]
    fn test_fresh_state() {
        let config = CurveConfig::default();
        let state = CurveState::new();

        assert_eq!(state.phase(), CurvePhase::Active);
        assert_eq!(
            state.virtual_reserves(&config).unwrap(),
            (DEFAULT_VIRTUAL_SOL_RESERVES, DEFAULT_VIRTUAL_TOKEN_RESERVES)
        );
        assert_eq!(state.tokens_remaining(&config), DEFAULT_BONDING_CURVE_SUPPLY);
        assert_eq!(state.progress_bps(&config), 0);
        assert_eq!(state.market_cap(&config).unwrap(), 27_958_993_476);
    }

    #[test]
    fn test_progress_bps() {
        let config = CurveConfig::default();
        let state = CurveState {
            tokens_sold: DEFAULT_BONDING_CURVE_SUPPLY / 4,
            ..CurveState::new()
        };
        assert_eq!(state.progress_bps(&config), 2_500);

        let sold_out = CurveState {
            tokens_sold: DEFAULT_BONDING_CURVE_SUPPLY,
            ..CurveState::new()
        };
        assert_eq!(sold_out.progress_bps(&config), 10_000);
    }

    #[test]
    fn test_progress_bps_zero_supply_config() {
        let config = CurveConfig {
            bonding_curve_supply: 0,
            ..CurveConfig::default()
        };
        assert!(config.validate().is_err());
        let state = CurveState {
            tokens_sold: 5,
            ..CurveState::new()
        };
        assert_eq!(state.progress_bps(&config), 0);
    }

    #[test]
    fn test_validate_rejects_oversold_state() {
        let config = CurveConfig::default();
        let state = CurveState {
            tokens_sold: DEFAULT_BONDING_CURVE_SUPPLY + 1,
            ..CurveState::new()
        };
        assert_eq!(
            state.validate(&config).unwrap_err(),
            curve_err(CurveError::InvalidState)
        );
    }

    #[test]
    fn test_virtual_sol_overflow_reported() {
        let config = CurveConfig::default();
        let state = CurveState {
            sol_raised: u64::MAX,
            ..CurveState::new()
        };
        assert_eq!(
            state.virtual_reserves(&config).unwrap_err(),
            curve_err(CurveError::MathOverflow)
        );
    }

    #[test]
    fn test_graduated_phase() {
        let state = CurveState {
            is_graduated: true,
            ..CurveState::new()
        };
        assert_eq!(state.phase(), CurvePhase::Graduated);
    }
}
