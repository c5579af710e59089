use anchor_lang::prelude::*;

use crate::engine;
use crate::events::{
    LotteryConfigured, MinAmountChanged, OwnershipTransferred, RewardDistributorChanged,
    TreasuryChanged,
};
use crate::state::LotteryConfig;
use crate::{InitializeConfig, UpdateConfig};

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    min_amount: u64,
    treasury: Pubkey,
    reward_distributor: Pubkey,
    reward_tiers: Vec<u64>,
) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let pay_token = ctx.accounts.pay_token.key();

    let mut cfg = LotteryConfig::new(
        owner,
        pay_token,
        min_amount,
        treasury,
        reward_distributor,
        reward_tiers,
        ctx.accounts.pot_vault.key(),
    )?;
    cfg.bump = ctx.bumps.config;
    cfg.pot_vault_bump = ctx.bumps.pot_vault;

    msg!(
        "Lottery configured: variant={:?} min_amount={} tiers={:?}",
        cfg.variant,
        cfg.min_amount,
        cfg.reward_tiers
    );
    emit!(LotteryConfigured {
        owner,
        pay_token,
        min_amount,
        reward_tiers: cfg.reward_tiers.clone(),
    });

    ctx.accounts.config.set_inner(cfg);
    Ok(())
}

pub fn change_min_pay_token_amount(ctx: Context<UpdateConfig>, new_amount: u64) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let old_amount = engine::set_min_amount(&mut ctx.accounts.config, &caller, new_amount)?;

    emit!(MinAmountChanged {
        old_amount,
        new_amount,
    });
    Ok(())
}

pub fn change_treasury(ctx: Context<UpdateConfig>, new_treasury: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let old_treasury = engine::set_treasury(&mut ctx.accounts.config, &caller, new_treasury)?;

    emit!(TreasuryChanged {
        old_treasury,
        new_treasury,
    });
    Ok(())
}

pub fn change_reward_distributor(ctx: Context<UpdateConfig>, new_distributor: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let old_distributor =
        engine::set_reward_distributor(&mut ctx.accounts.config, &caller, new_distributor)?;

    emit!(RewardDistributorChanged {
        old_distributor,
        new_distributor,
    });
    Ok(())
}

pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let previous_owner = engine::set_owner(&mut ctx.accounts.config, &caller, new_owner)?;

    msg!("Ownership transferred: {} -> {}", previous_owner, new_owner);
    emit!(OwnershipTransferred {
        previous_owner,
        new_owner,
    });
    Ok(())
}
