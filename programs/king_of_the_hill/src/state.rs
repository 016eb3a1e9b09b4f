//! Program state and the transitions applied to it.
//!
//! The prize pool itself is not stored here: it is the lamport balance of the vault PDA, so the
//! transitions take the current pool as an argument. Each transition validates everything before
//! writing a single field, leaving the account untouched on error.

use anchor_lang::prelude::*;

use crate::error::KingOfTheHillError;
use crate::schedule::{fee_schedule, min_wait_blocks, require_affordable, FeeTier};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
/// The current king and the slot at which they took the crown.
pub struct Reign {
    pub king: Pubkey,
    pub height: u64,
}

#[account]
#[derive(InitSpace, Debug)]
/// Singleton game account (PDA).
pub struct Game {
    /// Deployer; recorded for audit, carries no privileges.
    pub authority: Pubkey,
    /// Fixed at deployment to `PROTOCOL_FEE_RECIPIENT`.
    pub protocol_fee_recipient: Pubkey,
    /// `None` before the first crowning and after every claim.
    pub reign: Option<Reign>,
    /// Number of successful `become_king` calls.
    pub total_crownings: u64,
    /// Lamports paid to the fee recipient over the life of the game.
    pub total_fees_collected: u64,
    /// Lamports paid out to kings over the life of the game.
    pub total_prizes_paid: u64,
    /// Number of successful claims.
    pub rounds_completed: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// Snapshot returned by `get_claim_status`.
pub struct ClaimStatus {
    pub king: Option<Pubkey>,
    pub king_height: Option<u64>,
    pub prize_pool: u64,
    pub min_wait: u64,
    /// First slot at which the king may claim, if there is a king.
    pub claimable_at: Option<u64>,
}

/// Outcome of a crowning: what the challenger owes and the pool once it is paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crowning {
    pub tier: FeeTier,
    pub prize_pool: u64,
}

/// Lamports owed to the king by a successful claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub king: Pubkey,
    pub amount: u64,
}

impl Game {
    pub fn king(&self) -> Option<Pubkey> {
        self.reign.map(|reign| reign.king)
    }

    pub fn king_height(&self) -> Option<u64> {
        self.reign.map(|reign| reign.height)
    }

    /// Reject any fee recipient other than the one fixed at deployment.
    pub fn check_fee_recipient(&self, fee_recipient: Pubkey) -> Result<()> {
        require_keys_eq!(
            fee_recipient,
            self.protocol_fee_recipient,
            KingOfTheHillError::InvalidFeeRecipient
        );
        Ok(())
    }

    /// Crown `king` at `height`, priced against a pool of `prize_pool_before` lamports.
    ///
    /// `payer_balance` must cover the tier total and leave the payer empty or at or above
    /// `rent_floor`. Any caller may be crowned, including the sitting king.
    pub fn crown(
        &mut self,
        king: Pubkey,
        height: u64,
        prize_pool_before: u64,
        payer_balance: u64,
        rent_floor: u64,
    ) -> Result<Crowning> {
        let tier = fee_schedule(prize_pool_before);
        require_affordable(payer_balance, tier.total()?, rent_floor)?;
        let prize_pool = prize_pool_before
            .checked_add(tier.contribution)
            .ok_or(KingOfTheHillError::MathOverflow)?;
        let total_crownings = self
            .total_crownings
            .checked_add(1)
            .ok_or(KingOfTheHillError::MathOverflow)?;
        let total_fees_collected = self
            .total_fees_collected
            .checked_add(tier.fee)
            .ok_or(KingOfTheHillError::MathOverflow)?;

        self.reign = Some(Reign { king, height });
        self.total_crownings = total_crownings;
        self.total_fees_collected = total_fees_collected;
        Ok(Crowning { tier, prize_pool })
    }

    /// Check that `caller` may claim a pool of `prize_pool` lamports at `height`.
    ///
    /// Not being the king is reported before the wait window is looked at.
    pub fn authorize_claim(&self, caller: Pubkey, height: u64, prize_pool: u64) -> Result<Reign> {
        let reign = match self.reign {
            Some(reign) if reign.king == caller => reign,
            _ => return err!(KingOfTheHillError::Unauthorized),
        };
        let held_for = height.saturating_sub(reign.height);
        require!(
            held_for > min_wait_blocks(prize_pool),
            KingOfTheHillError::TooEarly
        );
        Ok(reign)
    }

    /// Authorize `caller` and vacate the crown; the whole `prize_pool` is owed to the king.
    pub fn claim(&mut self, caller: Pubkey, height: u64, prize_pool: u64) -> Result<Payout> {
        let reign = self.authorize_claim(caller, height, prize_pool)?;
        self.end_reign(prize_pool)?;
        Ok(Payout {
            king: reign.king,
            amount: prize_pool,
        })
    }

    /// Clear the reign after `paid` lamports left the vault.
    pub fn end_reign(&mut self, paid: u64) -> Result<()> {
        let total_prizes_paid = self
            .total_prizes_paid
            .checked_add(paid)
            .ok_or(KingOfTheHillError::MathOverflow)?;
        let rounds_completed = self
            .rounds_completed
            .checked_add(1)
            .ok_or(KingOfTheHillError::MathOverflow)?;

        self.reign = None;
        self.total_prizes_paid = total_prizes_paid;
        self.rounds_completed = rounds_completed;
        Ok(())
    }

    /// First slot at which the current king may claim a pool of `prize_pool` lamports.
    pub fn claimable_at(&self, prize_pool: u64) -> Result<Option<u64>> {
        let Some(reign) = self.reign else {
            return Ok(None);
        };
        let at = reign
            .height
            .checked_add(min_wait_blocks(prize_pool))
            .and_then(|h| h.checked_add(1))
            .ok_or(KingOfTheHillError::MathOverflow)?;
        Ok(Some(at))
    }

    pub fn claim_status(&self, prize_pool: u64) -> Result<ClaimStatus> {
        Ok(ClaimStatus {
            king: self.king(),
            king_height: self.king_height(),
            prize_pool,
            min_wait: min_wait_blocks(prize_pool),
            claimable_at: self.claimable_at(prize_pool)?,
        })
    }
}
