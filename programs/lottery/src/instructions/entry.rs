use anchor_lang::prelude::*;

use crate::engine;
use crate::errors::LotteryError;
use crate::events::LotteryEntered;
use crate::ledger::SplLedger;
use crate::EnterLottery;

pub fn enter_lottery(ctx: Context<EnterLottery>, lottery_id: u64, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let player = ctx.accounts.player.key();

    // the player signs its own debit; no program authority is involved
    let mut ledger = SplLedger::new(
        ctx.accounts.token_program.to_account_info(),
        cfg.pay_token,
        cfg.to_account_info(),
        cfg.bump,
        vec![
            ctx.accounts.player_token_account.to_account_info(),
            ctx.accounts.stake_vault.to_account_info(),
            ctx.accounts.player.to_account_info(),
        ],
    );

    let lottery = &mut ctx.accounts.lottery;
    let index = engine::enter_lottery(cfg, lottery, &player, amount, &mut ledger)?;
    let entry_index = u16::try_from(index).map_err(|_| LotteryError::MathOverflow)?;

    emit!(LotteryEntered {
        lottery_id,
        player,
        amount,
        entry_index,
        total_staked: lottery.total_staked,
    });
    Ok(())
}
