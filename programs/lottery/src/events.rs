use anchor_lang::prelude::*;

#[event]
pub struct LotteryConfigured {
    pub owner: Pubkey,
    pub pay_token: Pubkey,
    pub min_amount: u64,
    pub reward_tiers: Vec<u64>,
}

#[event]
pub struct LotteryCreated {
    pub lottery_id: u64,
    pub creator: Pubkey,
    pub slot: u64,
}

#[event]
pub struct LotteryEntered {
    pub lottery_id: u64,
    pub player: Pubkey,
    pub amount: u64,
    pub entry_index: u16,
    pub total_staked: u64,
}

#[event]
pub struct LotteryEnded {
    pub lottery_id: u64,
    pub winners: Vec<Pubkey>,
    pub payouts: Vec<u64>,
    pub slot: u64,
}

#[event]
pub struct MinAmountChanged {
    pub old_amount: u64,
    pub new_amount: u64,
}

#[event]
pub struct TreasuryChanged {
    pub old_treasury: Pubkey,
    pub new_treasury: Pubkey,
}

#[event]
pub struct RewardDistributorChanged {
    pub old_distributor: Pubkey,
    pub new_distributor: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
