use anchor_lang::prelude::*;

use crate::engine;
use crate::events::{LotteryCreated, LotteryEnded};
use crate::ledger::SplLedger;
use crate::utils::{draw_seed, most_recent_slot_hash, HashStream};
use crate::{CreateLottery, EndLottery};

pub fn create_lottery(ctx: Context<CreateLottery>) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let slot = Clock::get()?.slot;

    let mut lottery = engine::open_lottery(
        &mut ctx.accounts.config,
        ctx.accounts.current_lottery.as_deref(),
        &caller,
        slot,
    )?;
    lottery.bump = ctx.bumps.lottery;
    let lottery_id = lottery.lottery_id;

    ctx.accounts.lottery.set_inner(lottery);

    emit!(LotteryCreated {
        lottery_id,
        creator: caller,
        slot,
    });
    Ok(())
}

pub fn end_lottery<'info>(
    ctx: Context<'_, '_, 'info, 'info, EndLottery<'info>>,
    lottery_id: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let caller = ctx.accounts.owner.key();
    let slot = Clock::get()?.slot;

    let recent_hash = {
        let data = ctx.accounts.recent_slothashes.try_borrow_data()?;
        most_recent_slot_hash(&data)?
    };
    let entries = ctx.accounts.lottery.players.len() as u64;
    let mut random = HashStream::new(draw_seed(
        ctx.program_id,
        lottery_id,
        slot,
        &recent_hash,
        entries,
    ));

    let mut accounts = Vec::with_capacity(1 + ctx.remaining_accounts.len());
    accounts.push(ctx.accounts.funding_account.to_account_info());
    accounts.extend(ctx.remaining_accounts.iter().cloned());

    let mut ledger = SplLedger::new(
        ctx.accounts.token_program.to_account_info(),
        cfg.pay_token,
        cfg.to_account_info(),
        cfg.bump,
        accounts,
    );

    let draw = engine::close_lottery(
        cfg,
        &mut ctx.accounts.lottery,
        &caller,
        &mut ledger,
        &mut random,
        slot,
    )?;

    msg!(
        "Lottery {} ended: winners={:?} payouts={:?}",
        draw.lottery_id,
        draw.winners,
        draw.payouts
    );
    emit!(LotteryEnded {
        lottery_id: draw.lottery_id,
        winners: draw.winners,
        payouts: draw.payouts,
        slot,
    });
    Ok(())
}
