use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::CurveError;

/// Per-deployment curve constants. Amounts are lamports (SOL side) and token
/// base units (token side); the graduation threshold is a market cap in
/// lamports.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct CurveConfig {
    /// SOL liquidity assumed present before any real trading
    pub virtual_sol_reserves: u64,
    /// Token liquidity assumed present before any real trading
    pub virtual_token_reserves: u64,
    /// Full mint supply, used for market cap
    pub total_supply: u64,
    /// Portion of the supply the curve may sell
    pub bonding_curve_supply: u64,
    /// Market cap at which the curve freezes and hands off to external liquidity
    pub graduation_market_cap: u64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            virtual_sol_reserves: DEFAULT_VIRTUAL_SOL_RESERVES,
            virtual_token_reserves: DEFAULT_VIRTUAL_TOKEN_RESERVES,
            total_supply: DEFAULT_TOTAL_SUPPLY,
            bonding_curve_supply: DEFAULT_BONDING_CURVE_SUPPLY,
            graduation_market_cap: DEFAULT_GRADUATION_MARKET_CAP,
        }
    }
}

impl CurveConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.virtual_sol_reserves > 0, CurveError::InvalidConfig);
        require!(self.virtual_token_reserves > 0, CurveError::InvalidConfig);
        require!(self.total_supply > 0, CurveError::InvalidConfig);
        require!(
            self.bonding_curve_supply > 0 && self.bonding_curve_supply <= self.total_supply,
            CurveError::InvalidConfig
        );
        // Selling the whole curve supply must leave virtual tokens behind
        require!(
            self.bonding_curve_supply < self.virtual_token_reserves,
            CurveError::InvalidConfig
        );
        require!(self.graduation_market_cap > 0, CurveError::InvalidConfig);
        // Past the final market cap every buy fails with InsufficientSupply,
        // so the curve could never graduate
        require!(
            (self.graduation_market_cap as u128) <= self.max_market_cap(),
            CurveError::InvalidConfig
        );
        Ok(())
    }

    /// Market cap in lamports once the whole curve supply has sold:
    /// `k / t * total_supply / t` with `t = virtual_token_reserves - bonding_curve_supply`.
    /// Only meaningful for a config whose reserve and supply fields already check out.
    pub fn max_market_cap(&self) -> u128 {
        let remaining = self
            .virtual_token_reserves
            .saturating_sub(self.bonding_curve_supply) as u128;
        if remaining == 0 {
            return 0;
        }
        let virtual_sol =
            (self.virtual_sol_reserves as u128) * (self.virtual_token_reserves as u128) / remaining;
        virtual_sol
            .checked_mul(self.total_supply as u128)
            .map_or(u128::MAX, |v| v / remaining)
    }

    /// Tokens held back from the curve for the external pool.
    pub fn migration_supply(&self) -> u64 {
        self.total_supply.saturating_sub(self.bonding_curve_supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::test_support::curve_err;

    #[test]
    fn test_default_config_is_valid() {
        let config = CurveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.migration_supply(), 200_000_000 * TOKEN_UNIT);
    }

    #[test]
    fn test_rejects_zero_virtual_reserves() {
        let config = CurveConfig {
            virtual_sol_reserves: 0,
            ..CurveConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), curve_err(CurveError::InvalidConfig));
    }

    #[test]
    fn test_rejects_curve_supply_above_total() {
        let config = CurveConfig {
            bonding_curve_supply: DEFAULT_TOTAL_SUPPLY + 1,
            virtual_token_reserves: u64::MAX,
            ..CurveConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_curve_supply_exhausting_virtual_tokens() {
        let config = CurveConfig {
            virtual_token_reserves: DEFAULT_BONDING_CURVE_SUPPLY,
            ..CurveConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let config = CurveConfig {
            graduation_market_cap: 0,
            ..CurveConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_max_market_cap() {
        // 30 SOL * 1.073B / 273M left, applied to 1B supply
        assert_eq!(CurveConfig::default().max_market_cap(), 431_912_409_934);
    }

    #[test]
    fn test_rejects_unreachable_threshold() {
        let config = CurveConfig {
            graduation_market_cap: 500_000_000_000,
            ..CurveConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), curve_err(CurveError::InvalidConfig));

        let config = CurveConfig {
            graduation_market_cap: 431_912_409_934,
            ..CurveConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = CurveConfig {
            graduation_market_cap: 431_912_409_935,
            ..CurveConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
