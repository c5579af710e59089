use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LotteryError;
use crate::ledger::{TokenLedger, TokenTransfer};
use crate::state::{Lottery, LotteryConfig, LotteryInfo, LotteryStatus, LotteryVariant};
use crate::utils::RandomSource;

/// Winners and what each was paid, in rank order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LotteryDraw {
    pub lottery_id: u64,
    pub winners: Vec<Pubkey>,
    pub payouts: Vec<u64>,
}

// -------------------------
// Access gating
// -------------------------
pub fn assert_owner(cfg: &LotteryConfig, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(cfg.owner, *caller, LotteryError::Unauthorized);
    Ok(())
}

fn assert_current_and_active(cfg: &LotteryConfig, lottery: &Lottery) -> Result<()> {
    require!(
        lottery.lottery_id == cfg.current_lottery_id && lottery.is_active(),
        LotteryError::LotteryNotActive
    );
    Ok(())
}

// -------------------------
// Lifecycle
// -------------------------

/// Opens the next lottery. `current` is the lottery at `current_lottery_id`,
/// absent only before the first one.
pub fn open_lottery(
    cfg: &mut LotteryConfig,
    current: Option<&Lottery>,
    caller: &Pubkey,
    slot: u64,
) -> Result<Lottery> {
    assert_owner(cfg, caller)?;

    match current {
        Some(lottery) => {
            require!(
                lottery.lottery_id == cfg.current_lottery_id,
                LotteryError::LotteryMismatch
            );
            require!(!lottery.is_active(), LotteryError::LotteryAlreadyActive);
        }
        None => {
            require!(
                cfg.current_lottery_id == INITIAL_LOTTERY_ID,
                LotteryError::CurrentLotteryRequired
            );
        }
    }

    let lottery_id = cfg
        .current_lottery_id
        .checked_add(1)
        .ok_or(LotteryError::MathOverflow)?;
    cfg.current_lottery_id = lottery_id;

    Ok(Lottery::new(lottery_id, *caller, slot))
}

/// Takes `amount` from `player` and records the entry. Returns the entry's slot.
pub fn enter_lottery<L: TokenLedger>(
    cfg: &LotteryConfig,
    lottery: &mut Lottery,
    player: &Pubkey,
    amount: u64,
    ledger: &mut L,
) -> Result<usize> {
    assert_current_and_active(cfg, lottery)?;
    require!(amount >= cfg.min_amount, LotteryError::InsufficientAmount);
    require!(lottery.creator != *player, LotteryError::CreatorExcluded);
    require!(lottery.players.len() < MAX_PLAYERS, LotteryError::LotteryFull);

    let total_staked = lottery
        .total_staked
        .checked_add(amount)
        .ok_or(LotteryError::MathOverflow)?;
    let pot_amount = match cfg.variant {
        LotteryVariant::Tiered => lottery.pot_amount,
        LotteryVariant::Jackpot => lottery
            .pot_amount
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?,
    };

    ledger.transfer_all(&[TokenTransfer {
        from: *player,
        to: cfg.stake_destination(),
        amount,
    }])?;

    lottery.players.push(*player);
    lottery.total_staked = total_staked;
    lottery.pot_amount = pot_amount;

    Ok(lottery.players.len() - 1)
}

/// Draws `count` entry slots without replacement. A player holding several
/// slots can win several ranks.
pub fn select_winners<R: RandomSource>(
    players: &[Pubkey],
    count: usize,
    random: &mut R,
) -> Vec<Pubkey> {
    let mut pool = players.to_vec();
    let mut winners = Vec::with_capacity(count);

    while winners.len() < count && !pool.is_empty() {
        let idx = random.next_below(pool.len() as u64) as usize;
        winners.push(pool.swap_remove(idx));
    }

    winners
}

/// Transfers paying `winners`, in rank order.
pub fn plan_payouts<L: TokenLedger>(
    cfg: &LotteryConfig,
    winners: &[Pubkey],
    ledger: &L,
) -> Result<Vec<TokenTransfer>> {
    match cfg.variant {
        LotteryVariant::Tiered => Ok(winners
            .iter()
            .zip(cfg.reward_tiers.iter())
            .map(|(winner, tier)| TokenTransfer {
                from: cfg.reward_distributor,
                to: *winner,
                amount: *tier,
            })
            .collect()),
        LotteryVariant::Jackpot => {
            let pot = ledger.balance_of(&cfg.pot_vault)?;
            Ok(winners
                .iter()
                .take(1)
                .map(|winner| TokenTransfer {
                    from: cfg.pot_vault,
                    to: *winner,
                    amount: pot,
                })
                .collect())
        }
    }
}

/// Ends the lottery: draws winners, pays them, and only then marks it ended.
pub fn close_lottery<L: TokenLedger, R: RandomSource>(
    cfg: &LotteryConfig,
    lottery: &mut Lottery,
    caller: &Pubkey,
    ledger: &mut L,
    random: &mut R,
    slot: u64,
) -> Result<LotteryDraw> {
    assert_owner(cfg, caller)?;
    assert_current_and_active(cfg, lottery)?;
    require!(
        lottery.players.len() >= cfg.min_participants(),
        LotteryError::InsufficientParticipants
    );
    // every entrant, not only the winners, must be payable before the draw
    for entrant in lottery.players.iter().collect::<BTreeSet<_>>() {
        require!(ledger.has_account(entrant), LotteryError::EntrantAccountMissing);
    }

    let winners = select_winners(&lottery.players, cfg.winner_count(), random);
    let transfers = plan_payouts(cfg, &winners, ledger)?;
    ledger.transfer_all(&transfers)?;

    let payouts: Vec<u64> = transfers.iter().map(|t| t.amount).collect();

    lottery.winners = winners.clone();
    lottery.payouts = payouts.clone();
    lottery.status = LotteryStatus::Ended;
    lottery.ended_slot = slot;
    if cfg.variant == LotteryVariant::Jackpot {
        lottery.pot_amount = 0;
    }

    Ok(LotteryDraw {
        lottery_id: lottery.lottery_id,
        winners,
        payouts,
    })
}

// -------------------------
// Admin (each returns the previous value)
// -------------------------
pub fn set_min_amount(cfg: &mut LotteryConfig, caller: &Pubkey, amount: u64) -> Result<u64> {
    assert_owner(cfg, caller)?;
    Ok(std::mem::replace(&mut cfg.min_amount, amount))
}

pub fn set_treasury(cfg: &mut LotteryConfig, caller: &Pubkey, treasury: Pubkey) -> Result<Pubkey> {
    assert_owner(cfg, caller)?;
    Ok(std::mem::replace(&mut cfg.treasury, treasury))
}

pub fn set_reward_distributor(
    cfg: &mut LotteryConfig,
    caller: &Pubkey,
    reward_distributor: Pubkey,
) -> Result<Pubkey> {
    assert_owner(cfg, caller)?;
    Ok(std::mem::replace(&mut cfg.reward_distributor, reward_distributor))
}

pub fn set_owner(cfg: &mut LotteryConfig, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
    assert_owner(cfg, caller)?;
    Ok(std::mem::replace(&mut cfg.owner, new_owner))
}

// -------------------------
// In-process engine
// -------------------------

/// The lottery state machine over an injected ledger and random source.
/// Every mutating call runs to completion or leaves no trace.
pub struct Engine<L, R> {
    config: LotteryConfig,
    lotteries: BTreeMap<u64, Lottery>,
    ledger: L,
    random: R,
    slot: u64,
}

impl<L: TokenLedger, R: RandomSource> Engine<L, R> {
    pub fn new(config: LotteryConfig, ledger: L, random: R) -> Self {
        Self {
            config,
            lotteries: BTreeMap::new(),
            ledger,
            random,
            slot: 0,
        }
    }

    /// Slot stamped on the next operation; stored only once it succeeds.
    fn next_slot(&self) -> u64 {
        self.slot.saturating_add(1)
    }

    pub fn create_lottery(&mut self, caller: &Pubkey) -> Result<u64> {
        let slot = self.next_slot();
        let current = self.lotteries.get(&self.config.current_lottery_id);
        let lottery = open_lottery(&mut self.config, current, caller, slot)?;

        let lottery_id = lottery.lottery_id;
        self.lotteries.insert(lottery_id, lottery);
        self.slot = slot;
        Ok(lottery_id)
    }

    pub fn enter_lottery(&mut self, caller: &Pubkey, lottery_id: u64, amount: u64) -> Result<()> {
        let slot = self.next_slot();
        let lottery = self
            .lotteries
            .get_mut(&lottery_id)
            .ok_or(LotteryError::LotteryNotActive)?;
        enter_lottery(&self.config, lottery, caller, amount, &mut self.ledger)?;
        self.slot = slot;
        Ok(())
    }

    pub fn end_lottery(&mut self, caller: &Pubkey, lottery_id: u64) -> Result<LotteryDraw> {
        let slot = self.next_slot();
        assert_owner(&self.config, caller)?;
        let lottery = self
            .lotteries
            .get_mut(&lottery_id)
            .ok_or(LotteryError::LotteryNotActive)?;
        let draw = close_lottery(
            &self.config,
            lottery,
            caller,
            &mut self.ledger,
            &mut self.random,
            slot,
        )?;
        self.slot = slot;
        Ok(draw)
    }

    pub fn change_min_pay_token_amount(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        set_min_amount(&mut self.config, caller, amount).map(|_| ())
    }

    pub fn change_treasury(&mut self, caller: &Pubkey, treasury: Pubkey) -> Result<()> {
        set_treasury(&mut self.config, caller, treasury).map(|_| ())
    }

    pub fn change_reward_distributor(&mut self, caller: &Pubkey, reward_distributor: Pubkey) -> Result<()> {
        set_reward_distributor(&mut self.config, caller, reward_distributor).map(|_| ())
    }

    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
        set_owner(&mut self.config, caller, new_owner).map(|_| ())
    }

    pub fn get_lottery_info(&self, lottery_id: u64) -> Result<LotteryInfo> {
        self.lotteries
            .get(&lottery_id)
            .map(LotteryInfo::from)
            .ok_or_else(|| error!(LotteryError::LotteryNotActive))
    }

    pub fn current_lottery_id(&self) -> u64 {
        self.config.current_lottery_id
    }

    pub fn min_amount(&self) -> u64 {
        self.config.min_amount
    }

    pub fn pay_token(&self) -> Pubkey {
        self.config.pay_token
    }

    pub fn treasury(&self) -> Pubkey {
        self.config.treasury
    }

    pub fn reward_distributor(&self) -> Pubkey {
        self.config.reward_distributor
    }

    pub fn owner(&self) -> Pubkey {
        self.config.owner
    }

    /// Slot of the last successful lifecycle operation.
    pub fn slot(&self) -> u64 {
        self.slot
    }

    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}
