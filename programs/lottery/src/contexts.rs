// programs/lottery/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::LotteryError;
use crate::state::{Lottery, LotteryConfig};

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + LotteryConfig::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, LotteryConfig>,

    /// Mint staked by players and paid to winners.
    pub pay_token: Account<'info, Mint>,

    /// Program custody for jackpot stakes (authority = config PDA)
    #[account(
        init,
        payer = owner,
        seeds = [crate::POT_VAULT_SEED],
        bump,
        token::mint = pay_token,
        token::authority = config
    )]
    pub pot_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LotteryConfig>,

    pub owner: Signer<'info>,
}

// ----------------------------
// Lifecycle
// ----------------------------

#[derive(Accounts)]
pub struct CreateLottery<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LotteryConfig>,

    /// Lottery at `current_lottery_id`; omitted only before the first one.
    #[account(
        seeds = [crate::LOTTERY_SEED, config.current_lottery_id.to_le_bytes().as_ref()],
        bump
    )]
    pub current_lottery: Option<Account<'info, Lottery>>,

    #[account(
        init,
        payer = owner,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [crate::LOTTERY_SEED, config.next_lottery_id().to_le_bytes().as_ref()],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct EnterLottery<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        constraint = player_token_account.mint == config.pay_token @ LotteryError::InvalidTokenAccount,
        constraint = player_token_account.owner == player.key() @ LotteryError::InvalidTokenAccount
    )]
    pub player_token_account: Account<'info, TokenAccount>,

    /// Treasury (tiered) or pot vault (jackpot), addressed directly or by its owner.
    #[account(
        mut,
        constraint = stake_vault.mint == config.pay_token @ LotteryError::InvalidTokenAccount,
        constraint = stake_vault.key() == config.stake_destination()
            || stake_vault.owner == config.stake_destination() @ LotteryError::InvalidTokenAccount
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// A pay-mint token account for every distinct entrant goes in `remaining_accounts`.
#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct EndLottery<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LotteryConfig>,

    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: reward distributor token account (tiered) or pot vault (jackpot);
    /// the ledger checks mint, balance and authority before any transfer.
    #[account(mut)]
    pub funding_account: UncheckedAccount<'info>,

    /// CHECK: SlotHashes sysvar, only its head entry is read.
    #[account(address = slot_hashes::ID)]
    pub recent_slothashes: UncheckedAccount<'info>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Views
// ----------------------------

#[derive(Accounts)]
#[instruction(lottery_id: u64)]
pub struct GetLotteryInfo<'info> {
    #[account(
        seeds = [crate::LOTTERY_SEED, lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,
}

#[derive(Accounts)]
pub struct GetConfigInfo<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, LotteryConfig>,
}
