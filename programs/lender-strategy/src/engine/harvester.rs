use solana_program::{
    msg,
    program_error::ProgramError,
};

use super::LenderStrategy;

impl<'a> LenderStrategy<'a> {
    /// Claim incentive rewards accrued on the share token and put them up for
    /// auction. Failures of the claim propagate; unclaimed rewards stay
    /// claimable for the next cycle.
    pub fn claim_and_sell_rewards(&mut self) -> Result<(), ProgramError> {
        let assets = [self.config.share_token];
        let custody = self.config.custody;

        let controller = match self.env.incentives.as_deref_mut() {
            Some(controller) => controller,
            None => {
                msg!("No incentives controller configured");
                return Ok(());
            }
        };

        let claimable = controller.get_rewards_balance(&assets, &custody)?;
        if claimable == 0 {
            msg!("No rewards to claim");
            return Ok(());
        }

        let claimed = controller.claim_rewards(&assets, u64::MAX, &custody)?;
        msg!("Claimed {} reward tokens", claimed);

        // Balance read after the claim, not derived from its return value
        let reward_balance = self.reward_balance()?;
        if reward_balance == 0 {
            return Ok(());
        }

        let pair = self.auction_pair();
        let reward_token = pair.from;
        if self.env.auction.status(&reward_token)?.in_flight() {
            msg!("Auction for {} still running, deferring {} rewards", reward_token, reward_balance);
            return Ok(());
        }

        self.enable_auction(&pair.from, &pair.to)?;
        Ok(())
    }
}
