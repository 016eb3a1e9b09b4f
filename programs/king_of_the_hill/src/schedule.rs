//! Tier lookups driven by the prize pool balance, and the balance checks shared by the handlers.
//!
//! Both tables in [`crate::constants`] are ordered by ascending threshold and the first row whose
//! threshold is `>=` the pool wins, so a pool sitting exactly on a boundary belongs to the lower
//! tier.

use anchor_lang::prelude::*;

use crate::constants::{FEE_TIERS, WAIT_TIERS};
use crate::error::KingOfTheHillError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// What a challenger pays to take the crown.
pub struct FeeTier {
    /// Lamports added to the prize pool.
    pub contribution: u64,
    /// Lamports sent to the protocol fee recipient.
    pub fee: u64,
}

impl FeeTier {
    /// Total lamports the challenger must hold.
    pub fn total(&self) -> Result<u64> {
        self.contribution
            .checked_add(self.fee)
            .ok_or(KingOfTheHillError::MathOverflow.into())
    }

    /// Destinations and amounts in payment order: the pool first, then the fee.
    pub fn payments(&self, vault: Pubkey, fee_recipient: Pubkey) -> [(Pubkey, u64); 2] {
        [(vault, self.contribution), (fee_recipient, self.fee)]
    }
}

/// Price of the crown for a pool holding `prize_pool_before` lamports before the new payment.
pub fn fee_schedule(prize_pool_before: u64) -> FeeTier {
    let (_, contribution, fee) = FEE_TIERS
        .iter()
        .find(|(threshold, _, _)| prize_pool_before <= *threshold)
        .or(FEE_TIERS.last())
        .copied()
        .unwrap_or_default();
    FeeTier { contribution, fee }
}

/// Slots a king must hold the crown, uncontested, beyond which the pool can be claimed.
pub fn min_wait_blocks(prize_pool: u64) -> u64 {
    let (_, wait) = WAIT_TIERS
        .iter()
        .find(|(threshold, _)| prize_pool <= *threshold)
        .or(WAIT_TIERS.last())
        .copied()
        .unwrap_or_default();
    wait
}

/// Check that a payer holding `balance` can send `amount` and end up either empty or at or above
/// `rent_floor`; the runtime rejects any balance strictly between the two.
pub fn require_affordable(balance: u64, amount: u64, rent_floor: u64) -> Result<()> {
    let remaining = balance
        .checked_sub(amount)
        .ok_or(KingOfTheHillError::InsufficientFunds)?;
    require!(
        remaining == 0 || remaining >= rent_floor,
        KingOfTheHillError::InsufficientFunds
    );
    Ok(())
}

/// Validate a top-up of `amount` from a funder holding `funder_balance` and return the new pool.
///
/// An emptied vault must come back at or above `rent_floor`.
pub fn funded_pool(
    prize_pool: u64,
    amount: u64,
    funder_balance: u64,
    rent_floor: u64,
) -> Result<u64> {
    require!(amount > 0, KingOfTheHillError::InvalidAmount);
    require_affordable(funder_balance, amount, rent_floor)?;
    let funded = prize_pool
        .checked_add(amount)
        .ok_or(KingOfTheHillError::MathOverflow)?;
    require!(funded >= rent_floor, KingOfTheHillError::InvalidAmount);
    Ok(funded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LAMPORTS_PER_SOL;

    const SOL: u64 = LAMPORTS_PER_SOL;
    const RENT_FLOOR: u64 = 890_880;

    fn code<T: std::fmt::Debug>(result: Result<T>) -> u32 {
        match result.unwrap_err() {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn low_tier_up_to_and_including_ten_sol() {
        let tier = FeeTier {
            contribution: 450_000_000,
            fee: 50_000_000,
        };
        assert_eq!(fee_schedule(0), tier);
        assert_eq!(fee_schedule(5 * SOL), tier);
        assert_eq!(fee_schedule(10 * SOL), tier);
    }

    #[test]
    fn mid_tier_starts_one_lamport_above_ten_sol() {
        let tier = FeeTier {
            contribution: 900_000_000,
            fee: 100_000_000,
        };
        assert_eq!(fee_schedule(10 * SOL + 1), tier);
        assert_eq!(fee_schedule(100 * SOL), tier);
    }

    #[test]
    fn top_tier_above_one_hundred_sol() {
        let tier = FeeTier {
            contribution: 1_350_000_000,
            fee: 150_000_000,
        };
        assert_eq!(fee_schedule(100 * SOL + 1), tier);
        assert_eq!(fee_schedule(1_000 * SOL), tier);
        assert_eq!(fee_schedule(u64::MAX), tier);
    }

    #[test]
    fn fee_is_a_tenth_of_what_the_challenger_pays() {
        for pool in [0, 10 * SOL + 1, 500 * SOL] {
            let tier = fee_schedule(pool);
            let total = tier.total().unwrap();
            assert_eq!(tier.fee * 10, total);
            assert_eq!(tier.contribution * 10, total * 9);
        }
    }

    #[test]
    fn payments_go_to_the_pool_before_the_fee() {
        let vault = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let tier = fee_schedule(0);
        assert_eq!(
            tier.payments(vault, recipient),
            [(vault, 450_000_000), (recipient, 50_000_000)]
        );
    }

    #[test]
    fn wait_window_shrinks_as_the_pool_grows() {
        assert_eq!(min_wait_blocks(0), 100);
        assert_eq!(min_wait_blocks(10 * SOL), 100);
        assert_eq!(min_wait_blocks(10 * SOL + 1), 10);
        assert_eq!(min_wait_blocks(100 * SOL), 10);
        assert_eq!(min_wait_blocks(100 * SOL + 1), 0);
        assert_eq!(min_wait_blocks(u64::MAX), 0);
    }

    #[test]
    fn total_overflow_is_reported() {
        let tier = FeeTier {
            contribution: u64::MAX,
            fee: 1,
        };
        assert!(tier.total().is_err());
    }

    #[test]
    fn payer_may_drain_to_zero_or_stay_rent_exempt() {
        assert!(require_affordable(SOL, SOL, RENT_FLOOR).is_ok());
        assert!(require_affordable(SOL + RENT_FLOOR, SOL, RENT_FLOOR).is_ok());
        assert_eq!(code(require_affordable(SOL - 1, SOL, RENT_FLOOR)), 402);
        assert_eq!(code(require_affordable(SOL + 1, SOL, RENT_FLOOR)), 402);
        assert_eq!(
            code(require_affordable(SOL + RENT_FLOOR - 1, SOL, RENT_FLOOR)),
            402
        );
    }

    #[test]
    fn funding_checks_amount_balance_and_vault_floor() {
        assert_eq!(funded_pool(5 * SOL, SOL, 2 * SOL, RENT_FLOOR).unwrap(), 6 * SOL);
        assert_eq!(code(funded_pool(5 * SOL, 0, 2 * SOL, RENT_FLOOR)), 406);
        assert_eq!(code(funded_pool(5 * SOL, 3 * SOL, 2 * SOL, RENT_FLOOR)), 402);
        assert_eq!(code(funded_pool(0, RENT_FLOOR - 1, SOL, RENT_FLOOR)), 406);
        assert_eq!(
            funded_pool(0, RENT_FLOOR, SOL, RENT_FLOOR).unwrap(),
            RENT_FLOOR
        );
        assert_eq!(code(funded_pool(u64::MAX, 1, SOL, RENT_FLOOR)), 404);
    }
}
