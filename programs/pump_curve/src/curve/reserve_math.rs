use anchor_lang::prelude::*;

use crate::errors::CurveError;

/// Output of a single constant-product step: what leaves the pool and the
/// virtual reserves left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveSwap {
    pub amount_out: u64,
    pub new_virtual_sol: u64,
    pub new_virtual_tokens: u64,
}

/// Calculates the amount of tokens released for a given SOL amount
///
/// The formula is derived from the constant product AMM formula: x * y = k
/// where x = virtual_sol and y = virtual_tokens
///
/// When a user buys tokens with SOL:
/// (virtual_sol + sol_in) * new_virtual_tokens = k
///
/// Solving for new_virtual_tokens:
/// new_virtual_tokens = (virtual_sol * virtual_tokens) / (virtual_sol + sol_in)
///
/// The tokens sent to the user are:
/// tokens_out = virtual_tokens - new_virtual_tokens
///
///  Price
///    ^
///    |                                  /|
///    |                                /
///    |                              /
///    |                         /
///    |                   /
///    |          _/
///    |____----
///    +------------------------------------> Tokens Sold
///
/// The curve approaches zero remaining tokens but never reaches it, so the
/// output is always strictly below `virtual_tokens`. Nothing here knows about
/// the real supply cap; the engine checks that separately.
pub fn buy(sol_in: u64, virtual_sol: u64, virtual_tokens: u64) -> Result<ReserveSwap> {
    require!(sol_in > 0, CurveError::InvalidAmount);
    require!(virtual_sol > 0 && virtual_tokens > 0, CurveError::InvalidState);

    let k = product(virtual_sol, virtual_tokens);
    let new_virtual_sol = (virtual_sol as u128) + (sol_in as u128);
    let new_virtual_tokens = div_retaining(k, new_virtual_sol)?;

    // k / new_virtual_sol < virtual_tokens, so the retained quotient never
    // exceeds the old reserve
    let tokens_out = (virtual_tokens as u128)
        .checked_sub(new_virtual_tokens)
        .ok_or(CurveError::MathOverflow)?;
    require!(tokens_out > 0, CurveError::InvalidAmount);

    Ok(ReserveSwap {
        amount_out: to_u64(tokens_out)?,
        new_virtual_sol: to_u64(new_virtual_sol)?,
        new_virtual_tokens: to_u64(new_virtual_tokens)?,
    })
}

/// Calculates the amount of SOL released for a given token amount
///
/// Inverse of [`buy`]:
/// new_virtual_tokens = virtual_tokens + tokens_in
/// new_virtual_sol = k / new_virtual_tokens
/// sol_out = virtual_sol - new_virtual_sol
///
///  SOL Received
///    ^
///    |\
///    |  \
///    |    \
///    |      \__
///    |         ----___________
///    +------------------------------------> Tokens Sold Back
///
/// The caller is responsible for checking `tokens_in` against what the curve
/// has actually issued.
pub fn sell(tokens_in: u64, virtual_sol: u64, virtual_tokens: u64) -> Result<ReserveSwap> {
    require!(tokens_in > 0, CurveError::InvalidAmount);
    require!(virtual_sol > 0 && virtual_tokens > 0, CurveError::InvalidState);

    let k = product(virtual_sol, virtual_tokens);
    let new_virtual_tokens = (virtual_tokens as u128) + (tokens_in as u128);
    let new_virtual_sol = div_retaining(k, new_virtual_tokens)?;

    let sol_out = (virtual_sol as u128)
        .checked_sub(new_virtual_sol)
        .ok_or(CurveError::MathOverflow)?;
    require!(sol_out > 0, CurveError::InvalidAmount);

    Ok(ReserveSwap {
        amount_out: to_u64(sol_out)?,
        new_virtual_sol: to_u64(new_virtual_sol)?,
        new_virtual_tokens: to_u64(new_virtual_tokens)?,
    })
}

/// k = x * y. Two u64 factors always fit in u128.
#[inline]
pub fn product(virtual_sol: u64, virtual_tokens: u64) -> u128 {
    (virtual_sol as u128) * (virtual_tokens as u128)
}

// floor(k / d) + 1: the reserve on the output side always keeps at least one
// base unit more than the exact quotient, so k never shrinks across a trade.
#[inline]
fn div_retaining(k: u128, d: u128) -> Result<u128> {
    k.checked_div(d)
        .and_then(|q| q.checked_add(1))
        .ok_or(CurveError::MathOverflow.into())
}

#[inline]
pub(crate) fn to_u64(v: u128) -> Result<u64> {
    u64::try_from(v).map_err(|_| CurveError::MathOverflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::curve::test_support::curve_err;

    const SOL: u64 = 1_000_000_000;

    #[test]
    fn test_buy_matches_reference_scenario() {
        let swap = buy(
            SOL,
            DEFAULT_VIRTUAL_SOL_RESERVES,
            DEFAULT_VIRTUAL_TOKEN_RESERVES,
        )
        .unwrap();

        // k = 30 SOL * 1.073B tokens, new_virtual_sol = 31 SOL
        assert_eq!(swap.new_virtual_sol, 31 * SOL);
        assert_eq!(swap.new_virtual_tokens, 1_038_387_096_774_193_549);
        assert_eq!(swap.amount_out, 34_612_903_225_806_451);
    }

    #[test]
    fn test_buy_keeps_product_within_one_step() {
        let (x, y) = (DEFAULT_VIRTUAL_SOL_RESERVES, DEFAULT_VIRTUAL_TOKEN_RESERVES);
        let swap = buy(7 * SOL + 123, x, y).unwrap();

        let before = product(x, y);
        let after = product(swap.new_virtual_sol, swap.new_virtual_tokens);
        assert!(after > before);
        assert!(after - before <= swap.new_virtual_sol as u128);
        assert!(swap.amount_out < y);
    }

    #[test]
    fn test_sell_keeps_product_within_one_step() {
        let (x, y) = (31 * SOL, 1_038_387_096_774_193_549);
        let swap = sell(12_345_678_901_234_567, x, y).unwrap();

        let before = product(x, y);
        let after = product(swap.new_virtual_sol, swap.new_virtual_tokens);
        assert!(after > before);
        assert!(after - before <= swap.new_virtual_tokens as u128);
    }

    #[test]
    fn test_sell_inverts_buy_minus_rounding() {
        let (x, y) = (DEFAULT_VIRTUAL_SOL_RESERVES, DEFAULT_VIRTUAL_TOKEN_RESERVES);
        let bought = buy(SOL, x, y).unwrap();
        let sold = sell(
            bought.amount_out,
            bought.new_virtual_sol,
            bought.new_virtual_tokens,
        )
        .unwrap();

        assert_eq!(sold.new_virtual_tokens, y);
        assert!(sold.amount_out < SOL);
        assert_eq!(sold.amount_out, SOL - 1);
    }

    #[test]
    fn test_zero_input_rejected() {
        assert!(buy(0, 30 * SOL, 1_000).is_err());
        assert!(sell(0, 30 * SOL, 1_000).is_err());
    }

    #[test]
    fn test_dust_input_that_cannot_move_curve_rejected() {
        // 1 lamport against a deep SOL side releases nothing after rounding
        let err = buy(1, 30 * SOL, 10).unwrap_err();
        assert_eq!(err, curve_err(CurveError::InvalidAmount));
    }

    #[test]
    fn test_empty_reserves_rejected() {
        let err = buy(SOL, 0, 10).unwrap_err();
        assert_eq!(err, curve_err(CurveError::InvalidState));
        let err = sell(10, 10, 0).unwrap_err();
        assert_eq!(err, curve_err(CurveError::InvalidState));
    }

    #[test]
    fn test_large_buy_never_drains_token_side() {
        let swap = buy(u64::MAX - 30 * SOL, 30 * SOL, 1_000_000).unwrap();
        assert!(swap.new_virtual_tokens >= 1);
        assert!(swap.amount_out < 1_000_000);
    }
}
