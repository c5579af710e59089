use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LotteryError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum LotteryVariant {
    /// Stakes go to the treasury, winners are paid fixed tiers by the reward distributor.
    Tiered,
    /// Stakes stay in the program pot, a single winner takes all of it.
    Jackpot,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum LotteryStatus {
    Active,
    Ended,
}

#[account]
#[derive(InitSpace)]
pub struct LotteryConfig {
    pub owner: Pubkey,
    pub bump: u8,

    /// Mint of the token used for stakes and rewards.
    pub pay_token: Pubkey,
    pub min_amount: u64,

    pub treasury: Pubkey,
    pub reward_distributor: Pubkey,

    /// Fixed payout per winner rank, index 0 is the top prize.
    /// Empty for the jackpot variant.
    #[max_len(5)]
    pub reward_tiers: Vec<u64>,
    pub variant: LotteryVariant,

    // program custody for jackpot stakes (token account owned by this PDA)
    pub pot_vault: Pubkey,
    pub pot_vault_bump: u8,

    pub current_lottery_id: u64,
    pub version: u16,
}

impl LotteryConfig {
    pub fn new(
        owner: Pubkey,
        pay_token: Pubkey,
        min_amount: u64,
        treasury: Pubkey,
        reward_distributor: Pubkey,
        reward_tiers: Vec<u64>,
        pot_vault: Pubkey,
    ) -> Result<Self> {
        require!(
            reward_tiers.len() <= MAX_REWARD_TIERS,
            LotteryError::InvalidRewardTiers
        );
        require!(
            reward_tiers.iter().all(|tier| *tier > 0),
            LotteryError::InvalidRewardTiers
        );

        let variant = if reward_tiers.is_empty() {
            LotteryVariant::Jackpot
        } else {
            LotteryVariant::Tiered
        };

        Ok(Self {
            owner,
            bump: 0,
            pay_token,
            min_amount,
            treasury,
            reward_distributor,
            reward_tiers,
            variant,
            pot_vault,
            pot_vault_bump: 0,
            current_lottery_id: INITIAL_LOTTERY_ID,
            version: INITIAL_VERSION,
        })
    }

    pub fn next_lottery_id(&self) -> u64 {
        self.current_lottery_id.saturating_add(1)
    }

    /// Number of winners drawn when a lottery ends.
    pub fn winner_count(&self) -> usize {
        match self.variant {
            LotteryVariant::Tiered => self.reward_tiers.len(),
            LotteryVariant::Jackpot => 1,
        }
    }

    pub fn min_participants(&self) -> usize {
        match self.variant {
            LotteryVariant::Tiered => MIN_TIERED_PARTICIPANTS.max(self.winner_count()),
            LotteryVariant::Jackpot => MIN_JACKPOT_PARTICIPANTS,
        }
    }

    /// Where entry stakes are sent.
    pub fn stake_destination(&self) -> Pubkey {
        match self.variant {
            LotteryVariant::Tiered => self.treasury,
            LotteryVariant::Jackpot => self.pot_vault,
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct Lottery {
    pub lottery_id: u64,
    pub bump: u8,

    pub creator: Pubkey,
    pub status: LotteryStatus,

    /// One slot per entry, in entry order. The same player may hold several.
    #[max_len(24)]
    pub players: Vec<Pubkey>,

    /// Filled once the lottery ends, ordered by reward rank.
    #[max_len(5)]
    pub winners: Vec<Pubkey>,
    #[max_len(5)]
    pub payouts: Vec<u64>,

    pub total_staked: u64,
    pub pot_amount: u64,

    pub created_slot: u64,
    pub ended_slot: u64,
}

impl Lottery {
    pub fn new(lottery_id: u64, creator: Pubkey, created_slot: u64) -> Self {
        Self {
            lottery_id,
            bump: 0,
            creator,
            status: LotteryStatus::Active,
            players: Vec::new(),
            winners: Vec::new(),
            payouts: Vec::new(),
            total_staked: 0,
            pot_amount: 0,
            created_slot,
            ended_slot: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LotteryStatus::Active
    }
}

// -------------------------
// Read models (view instructions)
// -------------------------
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct LotteryInfo {
    pub lottery_id: u64,
    pub creator: Pubkey,
    pub status: LotteryStatus,
    pub players: Vec<Pubkey>,
    pub winners: Vec<Pubkey>,
    pub payouts: Vec<u64>,
}

impl From<&Lottery> for LotteryInfo {
    fn from(lottery: &Lottery) -> Self {
        Self {
            lottery_id: lottery.lottery_id,
            creator: lottery.creator,
            status: lottery.status,
            players: lottery.players.clone(),
            winners: lottery.winners.clone(),
            payouts: lottery.payouts.clone(),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ConfigInfo {
    pub owner: Pubkey,
    pub pay_token: Pubkey,
    pub min_amount: u64,
    pub treasury: Pubkey,
    pub reward_distributor: Pubkey,
    pub reward_tiers: Vec<u64>,
    pub current_lottery_id: u64,
}

impl From<&LotteryConfig> for ConfigInfo {
    fn from(cfg: &LotteryConfig) -> Self {
        Self {
            owner: cfg.owner,
            pay_token: cfg.pay_token,
            min_amount: cfg.min_amount,
            treasury: cfg.treasury,
            reward_distributor: cfg.reward_distributor,
            reward_tiers: cfg.reward_tiers.clone(),
            current_lottery_id: cfg.current_lottery_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::program::MAX_RETURN_DATA;

    fn serialized_len<T: AnchorSerialize>(value: &T) -> usize {
        let mut buf = Vec::new();
        value.serialize(&mut buf).unwrap();
        buf.len()
    }

    fn drawn_full_lottery() -> Lottery {
        let mut lottery = Lottery::new(u64::MAX, Pubkey::new_unique(), 1);
        lottery.players = (0..MAX_PLAYERS).map(|_| Pubkey::new_unique()).collect();
        lottery.winners = lottery.players[..MAX_REWARD_TIERS].to_vec();
        lottery.payouts = vec![u64::MAX; MAX_REWARD_TIERS];
        lottery.status = LotteryStatus::Ended;
        lottery
    }

    #[test]
    fn largest_lottery_info_fits_return_data() {
        let info = LotteryInfo::from(&drawn_full_lottery());
        let len = serialized_len(&info);

        assert_eq!(
            len,
            LOTTERY_INFO_BASE_LEN + 32 * MAX_PLAYERS + (32 + 8) * MAX_REWARD_TIERS
        );
        assert!(len <= MAX_RETURN_DATA, "{len} > {MAX_RETURN_DATA}");
    }

    #[test]
    fn one_more_entry_would_overflow_return_data() {
        let mut lottery = drawn_full_lottery();
        lottery.players.push(Pubkey::new_unique());

        assert!(serialized_len(&LotteryInfo::from(&lottery)) > MAX_RETURN_DATA);
    }

    #[test]
    fn account_space_follows_limits() {
        let vectors = 4 + 32 * MAX_PLAYERS + 4 + 32 * MAX_REWARD_TIERS + 4 + 8 * MAX_REWARD_TIERS;
        assert_eq!(Lottery::INIT_SPACE, 8 + 1 + 32 + 1 + vectors + 8 * 4);

        let lottery = drawn_full_lottery();
        assert_eq!(serialized_len(&lottery), Lottery::INIT_SPACE);
    }

    #[test]
    fn config_space_holds_every_tier() {
        let cfg = LotteryConfig::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            100,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            vec![u64::MAX; MAX_REWARD_TIERS],
            Pubkey::new_unique(),
        )
        .unwrap();

        assert_eq!(serialized_len(&cfg), LotteryConfig::INIT_SPACE);
        assert!(serialized_len(&ConfigInfo::from(&cfg)) <= MAX_RETURN_DATA);
    }
}
