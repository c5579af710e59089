use anchor_lang::prelude::*;

use crate::state::{ConfigInfo, LotteryInfo};
use crate::{GetConfigInfo, GetLotteryInfo};

pub fn get_lottery_info(ctx: Context<GetLotteryInfo>) -> Result<LotteryInfo> {
    Ok(LotteryInfo::from(&*ctx.accounts.lottery))
}

pub fn get_config_info(ctx: Context<GetConfigInfo>) -> Result<ConfigInfo> {
    Ok(ConfigInfo::from(&*ctx.accounts.config))
}
