use anchor_lang::prelude::*;

/// Failures raised by the pricing engine. Every variant is returned before any
/// state is produced, so a rejected trade never yields a partial result.
#[error_code]
pub enum CurveError {
    #[msg("Trade amount must be positive and large enough to move the curve")]
    InvalidAmount,
    #[msg("Curve already graduated")]
    AlreadyGraduated,
    #[msg("Insufficient inventory remaining on curve")]
    InsufficientSupply,
    #[msg("Cannot sell more tokens than the curve has sold")]
    InsufficientBalance,
    #[msg("Output below the caller's slippage tolerance")]
    SlippageExceeded,
    #[msg("Slippage tolerance above 100%")]
    InvalidTolerance,
    #[msg("Invalid curve configuration")]
    InvalidConfig,
    #[msg("Curve state violates its reserve invariants")]
    InvalidState,
    #[msg("Math overflow/underflow")]
    MathOverflow,
}

#[error_code(offset = 6100)]
pub enum ProtocolError {
    #[msg("Not owner")]
    NotOwner,
    #[msg("Not the token creator")]
    NotCreator,
    #[msg("Bonding curve has not graduated")]
    NotGraduated,
    #[msg("Liquidity already migrated")]
    AlreadyMigrated,
    #[msg("No fees available to claim")]
    NoFeesToClaim,
    #[msg("Fee rate too high (max 10%)")]
    FeeTooHigh,
    #[msg("Nothing left in escrow to migrate")]
    NothingToMigrate,
}
