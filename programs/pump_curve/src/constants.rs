use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

// Mint decimals for every launched token. Matches lamports so both sides of the
// curve carry 9 fractional digits.
pub const TOKEN_DECIMALS: u8 = 9;
pub const TOKEN_UNIT: u64 = 1_000_000_000;

// Fixed point scale for prices (SOL per whole token)
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

// Basis point denominator 10_000 bps = 100.00%
pub const BPS_DENOMINATOR: u64 = 10_000;

pub const MAX_TOTAL_FEE_BPS: u16 = 1_000;
pub const DEFAULT_SLIPPAGE_BPS: u16 = 500;

// Calibration defaults, pump.fun style
pub const DEFAULT_VIRTUAL_SOL_RESERVES: u64 = 30 * LAMPORTS_PER_SOL;
pub const DEFAULT_VIRTUAL_TOKEN_RESERVES: u64 = 1_073_000_000 * TOKEN_UNIT;
pub const DEFAULT_TOTAL_SUPPLY: u64 = 1_000_000_000 * TOKEN_UNIT;
pub const DEFAULT_BONDING_CURVE_SUPPLY: u64 = 800_000_000 * TOKEN_UNIT;
pub const DEFAULT_GRADUATION_MARKET_CAP: u64 = 400 * LAMPORTS_PER_SOL;

// PDA seed strings
pub const SEED_GLOBAL_STATE: &str = "global_state";
pub const SEED_BONDING_CURVE: &str = "bonding_curve";
pub const SEED_SOL_ESCROW: &str = "bonding_curve_sol_escrow";
