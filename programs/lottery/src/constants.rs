use anchor_lang::solana_program::program::MAX_RETURN_DATA;

// Lottery limits
// ==============

/// Upper bound of reward tiers (and therefore winners) per lottery.
pub const MAX_REWARD_TIERS: usize = 5;

/// Serialized `LotteryInfo` without its vectors' elements: id, creator,
/// status and three length prefixes.
pub const LOTTERY_INFO_BASE_LEN: usize = 8 + 32 + 1 + 4 + 4 + 4;

/// Upper bound of entries per lottery, the most that still lets
/// `get_lottery_info` return a fully drawn lottery in one return-data buffer.
/// Every distinct entrant's token account is passed to `end_lottery`, so this
/// also bounds that transaction's account list.
pub const MAX_PLAYERS: usize =
    (MAX_RETURN_DATA - LOTTERY_INFO_BASE_LEN - MAX_REWARD_TIERS * (32 + 8)) / 32;

/// A tiered lottery cannot end with fewer entries than this, even when it
/// pays fewer tiers.
pub const MIN_TIERED_PARTICIPANTS: usize = 3;

/// A jackpot lottery needs a single entry to pick its winner.
pub const MIN_JACKPOT_PARTICIPANTS: usize = 1;

// Defaults
// ========

/// Id reported before the first lottery is created. The first lottery gets id 1.
pub const INITIAL_LOTTERY_ID: u64 = 0;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
