//! King of the Hill: an on-chain wager where the last one to pay wins the pot.
//!
//! High level flow:
//! - The deployer creates the singleton `Game` PDA and seeds the vault PDA with a bootstrap
//!   contribution. The vault's lamport balance *is* the prize pool.
//! - Anyone calls `become_king`, paying a tiered contribution into the vault plus a protocol fee
//!   to the fixed fee recipient, and becomes king at the current slot.
//! - The king calls `get_prize` once they have held the crown for more slots than the pool's wait
//!   window; the whole vault is paid out and the crown is vacated.
//! - Read-only instructions expose the king, the crowning slot, the pool and the claim window.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
mod constants;
mod error;
use error::*;
mod events;
use events::*;
mod schedule;
mod state;
use constants::*;
use schedule::*;
use state::*;
declare_id!("UxxZnkCpQkni7RuGRauw3VDNDzpUWscvoBY2k2JXuGY");

#[program]
pub mod king_of_the_hill {
    use super::*;

    /// Create the game and move the bootstrap contribution into the vault.
    pub fn initialize_game(ctx: Context<InitializeGame>) -> Result<()> {
        msg!(
            "Initializing game with bootstrap of {} lamports",
            BOOTSTRAP_CONTRIBUTION
        );
        require_affordable(
            ctx.accounts.authority.lamports(),
            BOOTSTRAP_CONTRIBUTION,
            Rent::get()?.minimum_balance(0),
        )?;
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.authority.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                },
            ),
            BOOTSTRAP_CONTRIBUTION,
        )?;

        let game = &mut ctx.accounts.game;
        game.authority = ctx.accounts.authority.key();
        game.protocol_fee_recipient = PROTOCOL_FEE_RECIPIENT;
        game.reign = None;
        game.total_crownings = 0;
        game.total_fees_collected = 0;
        game.total_prizes_paid = 0;
        game.rounds_completed = 0;
        game.bump = ctx.bumps.game;
        game.vault_bump = ctx.bumps.vault;

        emit!(GameInitialized {
            authority: game.authority,
            bootstrap: BOOTSTRAP_CONTRIBUTION,
            fee_recipient: game.protocol_fee_recipient,
        });
        Ok(())
    }

    /// Pay the current tier price and take the crown at the current slot.
    ///
    /// Payments follow `FeeTier::payments`: contribution into the vault, then the fee. The sitting
    /// king may call this again; they pay like anyone else.
    pub fn become_king(ctx: Context<BecomeKing>) -> Result<bool> {
        let challenger = ctx.accounts.challenger.key();
        msg!("Crowning {}", challenger);

        ctx.accounts
            .game
            .check_fee_recipient(ctx.accounts.fee_recipient.key())?;

        let height = Clock::get()?.slot;
        let crowning = ctx.accounts.game.crown(
            challenger,
            height,
            ctx.accounts.vault.lamports(),
            ctx.accounts.challenger.lamports(),
            Rent::get()?.minimum_balance(0),
        )?;

        let vault = ctx.accounts.vault.to_account_info();
        let fee_recipient = ctx.accounts.fee_recipient.to_account_info();
        for (to, amount) in crowning.tier.payments(vault.key(), fee_recipient.key()) {
            let to = if to == vault.key() {
                vault.clone()
            } else {
                fee_recipient.clone()
            };
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.challenger.to_account_info(),
                        to,
                    },
                ),
                amount,
            )?;
        }

        emit!(KingCrowned {
            king: challenger,
            height,
            contribution: crowning.tier.contribution,
            fee: crowning.tier.fee,
            prize_pool: crowning.prize_pool,
        });
        Ok(true)
    }

    /// Pay the whole vault to the king once the wait window for the current pool has passed.
    pub fn get_prize(ctx: Context<GetPrize>) -> Result<bool> {
        let caller = ctx.accounts.caller.key();
        msg!("Prize claim by {}", caller);

        let height = Clock::get()?.slot;
        let payout = ctx
            .accounts
            .game
            .claim(caller, height, ctx.accounts.vault.lamports())?;

        let bump_bytes = [ctx.accounts.game.vault_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, &bump_bytes]];
        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.caller.to_account_info(),
                },
                signer_seeds,
            ),
            payout.amount,
        )?;

        emit!(PrizeClaimed {
            king: payout.king,
            amount: payout.amount,
            height,
        });
        Ok(true)
    }

    /// Add lamports to the prize pool without touching the crown.
    pub fn fund_prize_pool(ctx: Context<FundPrizePool>, amount: u64) -> Result<()> {
        msg!("Funding prize pool with {} lamports", amount);
        let prize_pool = funded_pool(
            ctx.accounts.vault.lamports(),
            amount,
            ctx.accounts.funder.lamports(),
            Rent::get()?.minimum_balance(0),
        )?;

        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.funder.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                },
            ),
            amount,
        )?;

        emit!(PrizePoolFunded {
            funder: ctx.accounts.funder.key(),
            amount,
            prize_pool,
        });
        Ok(())
    }

    pub fn get_king(ctx: Context<ReadGame>) -> Result<Option<Pubkey>> {
        Ok(ctx.accounts.game.king())
    }

    pub fn get_king_height(ctx: Context<ReadGame>) -> Result<Option<u64>> {
        Ok(ctx.accounts.game.king_height())
    }

    pub fn get_prize_pool(ctx: Context<ReadGame>) -> Result<u64> {
        Ok(ctx.accounts.vault.lamports())
    }

    /// King, pool, wait window and the first slot at which a claim would succeed.
    pub fn get_claim_status(ctx: Context<ReadGame>) -> Result<ClaimStatus> {
        ctx.accounts
            .game
            .claim_status(ctx.accounts.vault.lamports())
    }
}

#[derive(Accounts)]
/// Accounts for creating the game; the authority pays rent and the bootstrap contribution.
pub struct InitializeGame<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(init, payer = authority, space = 8 + Game::INIT_SPACE, seeds = [GAME_SEED], bump)]
    pub game: Account<'info, Game>,

    #[account(mut, seeds = [VAULT_SEED], bump)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
/// Accounts for taking the crown.
pub struct BecomeKing<'info> {
    #[account(mut)]
    pub challenger: Signer<'info>,

    #[account(mut, seeds = [GAME_SEED], bump = game.bump)]
    pub game: Account<'info, Game>,

    #[account(mut, seeds = [VAULT_SEED], bump = game.vault_bump)]
    pub vault: SystemAccount<'info>,

    /// CHECK: Checked against the game's fee recipient in the handler - receives the protocol fee
    #[account(mut)]
    pub fee_recipient: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
/// Accounts for claiming the prize; the caller is checked against the king in the handler.
pub struct GetPrize<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(mut, seeds = [GAME_SEED], bump = game.bump)]
    pub game: Account<'info, Game>,

    #[account(mut, seeds = [VAULT_SEED], bump = game.vault_bump)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
/// Accounts for topping up the prize pool.
pub struct FundPrizePool<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(seeds = [GAME_SEED], bump = game.bump)]
    pub game: Account<'info, Game>,

    #[account(mut, seeds = [VAULT_SEED], bump = game.vault_bump)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
/// Accounts for the read-only queries.
pub struct ReadGame<'info> {
    #[account(seeds = [GAME_SEED], bump = game.bump)]
    pub game: Account<'info, Game>,

    #[account(seeds = [VAULT_SEED], bump = game.vault_bump)]
    pub vault: SystemAccount<'info>,
}
