use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

declare_id!("7Gny897kEKq5LCaKhV1jAB2eRfS1SrPktekjyMUQMRvE");

#[program]
pub mod lottery {
    use super::*;
    use crate::instructions::{admin, entry, lifecycle, view};

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        min_amount: u64,
        treasury: Pubkey,
        reward_distributor: Pubkey,
        reward_tiers: Vec<u64>,
    ) -> Result<()> {
        admin::initialize_config(ctx, min_amount, treasury, reward_distributor, reward_tiers)
    }

    // ----------------------------
    // Lifecycle
    // ----------------------------

    pub fn create_lottery(ctx: Context<CreateLottery>) -> Result<()> {
        lifecycle::create_lottery(ctx)
    }

    pub fn enter_lottery(ctx: Context<EnterLottery>, lottery_id: u64, amount: u64) -> Result<()> {
        entry::enter_lottery(ctx, lottery_id, amount)
    }

    /// Every distinct entrant's token account is passed as a remaining account.
    pub fn end_lottery<'info>(
        ctx: Context<'_, '_, 'info, 'info, EndLottery<'info>>,
        lottery_id: u64,
    ) -> Result<()> {
        lifecycle::end_lottery(ctx, lottery_id)
    }

    // ----------------------------
    // Admin
    // ----------------------------

    pub fn change_min_pay_token_amount(ctx: Context<UpdateConfig>, new_amount: u64) -> Result<()> {
        admin::change_min_pay_token_amount(ctx, new_amount)
    }

    pub fn change_treasury(ctx: Context<UpdateConfig>, new_treasury: Pubkey) -> Result<()> {
        admin::change_treasury(ctx, new_treasury)
    }

    pub fn change_reward_distributor(
        ctx: Context<UpdateConfig>,
        new_distributor: Pubkey,
    ) -> Result<()> {
        admin::change_reward_distributor(ctx, new_distributor)
    }

    pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
        admin::transfer_ownership(ctx, new_owner)
    }

    // ----------------------------
    // Views
    // ----------------------------

    pub fn get_lottery_info(ctx: Context<GetLotteryInfo>, _lottery_id: u64) -> Result<LotteryInfo> {
        view::get_lottery_info(ctx)
    }

    pub fn get_config_info(ctx: Context<GetConfigInfo>) -> Result<ConfigInfo> {
        view::get_config_info(ctx)
    }
}
