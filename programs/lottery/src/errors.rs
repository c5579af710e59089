use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Caller is not the owner")]
    Unauthorized,
    #[msg("Lottery is not active")]
    LotteryNotActive,
    #[msg("Current lottery was not ended")]
    LotteryAlreadyActive,
    #[msg("Lottery creator can't participate")]
    CreatorExcluded,
    #[msg("Not enough pay token!")]
    InsufficientAmount,
    #[msg("Not enough participants to end the lottery")]
    InsufficientParticipants,
    #[msg("Token account missing for a lottery entrant")]
    EntrantAccountMissing,
    #[msg("Token transfer rejected by the ledger")]
    TransferFailed,

    #[msg("Lottery has no room for more entries")]
    LotteryFull,
    #[msg("Invalid reward tiers")]
    InvalidRewardTiers,

    // create_lottery must see the round it replaces
    #[msg("Current lottery account is required")]
    CurrentLotteryRequired,
    #[msg("Lottery account does not match the current lottery id")]
    LotteryMismatch,

    #[msg("Token account does not match the lottery configuration")]
    InvalidTokenAccount,
    #[msg("Recent slot hashes unavailable")]
    RandomnessUnavailable,

    #[msg("Math overflow")]
    MathOverflow,
}
