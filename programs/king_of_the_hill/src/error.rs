use anchor_lang::prelude::*;

// Codes start at 401 so callers see 401 for "not the king" and 403 for "too early".
#[error_code(offset = 401)]
pub enum KingOfTheHillError {
    #[msg("Only the current king can claim the prize")]
    Unauthorized,

    #[msg("Insufficient funds to cover the required payment")]
    InsufficientFunds,

    #[msg("The wait window has not elapsed yet")]
    TooEarly,

    #[msg("Arithmetic overflow")]
    MathOverflow,

    #[msg("Fee recipient does not match the protocol fee recipient")]
    InvalidFeeRecipient,

    #[msg("Amount is zero or would leave the vault below the rent-exempt minimum")]
    InvalidAmount,
}
