use solana_program::{
    msg,
    program_error::ProgramError,
};

use crate::error::StrategyError;

use super::LenderStrategy;

impl<'a> LenderStrategy<'a> {
    /// Harvest, redeploy and report total assets.
    ///
    /// While shut down nothing is claimed or deployed and only the current
    /// value is reported. Any failure while harvesting or deploying aborts
    /// the whole report.
    pub fn harvest_and_report(&mut self) -> Result<u64, ProgramError> {
        if self.is_shutdown()? {
            msg!("Strategy shut down, reporting without harvest");
        } else {
            self.claim_and_sell_rewards()?;

            let loose = self.loose_balance()?;
            if loose > 0 {
                self.deploy_funds(loose)?;
            }
        }

        let total_assets = self.total_assets()?;
        msg!("Reported total assets: {}", total_assets);
        Ok(total_assets)
    }

    /// Position value plus loose asset, both read fresh
    pub fn total_assets(&self) -> Result<u64, ProgramError> {
        self.position_value()?
            .checked_add(self.loose_balance()?)
            .ok_or_else(|| StrategyError::ArithmeticOverflow.into())
    }
}
