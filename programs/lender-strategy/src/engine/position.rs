use solana_program::{
    msg,
    program_error::ProgramError,
};

use crate::{
    access::{AccessPolicy, AuthorizationContext, Role},
    error::StrategyError,
    interfaces::AssetStorage,
};

use super::LenderStrategy;

/// Convert a share balance to asset terms, rounding down exactly as the
/// yield source does so the result is always redeemable.
pub fn shares_to_assets(
    shares: u64,
    total_deposits: u64,
    total_supply: u64,
) -> Result<u64, ProgramError> {
    if total_supply == 0 {
        return Ok(0);
    }

    if shares > total_supply {
        return Err(StrategyError::ShareBalanceExceedsSupply.into());
    }

    let value = (shares as u128)
        .checked_mul(total_deposits as u128)
        .ok_or(StrategyError::ArithmeticOverflow)?
        / total_supply as u128;

    u64::try_from(value).map_err(|_| StrategyError::ArithmeticOverflow.into())
}

impl<'a> LenderStrategy<'a> {
    pub fn asset_storage(&self) -> Result<AssetStorage, ProgramError> {
        self.env.yield_source.asset_storage(&self.config.asset)
    }

    /// Asset value of the held share balance
    pub fn position_value(&self) -> Result<u64, ProgramError> {
        let shares = self.share_balance()?;
        if shares == 0 {
            return Ok(0);
        }

        let storage = self.asset_storage()?;
        let supply = self.env.tokens.total_supply(&self.config.share_token)?;
        shares_to_assets(shares, storage.total_deposits, supply)
    }

    /// Deposit `amount` into the yield source. A no-op while shut down.
    pub fn deploy_funds(&mut self, amount: u64) -> Result<(), ProgramError> {
        if self.is_shutdown()? {
            msg!("Strategy shut down, skipping deployment of {}", amount);
            return Ok(());
        }

        if amount == 0 {
            return Ok(());
        }

        self.env
            .yield_source
            .deposit(&self.config.asset, amount, self.config.use_as_collateral)?;

        msg!("Deployed {} into yield source", amount);
        Ok(())
    }

    /// Withdraw `amount` from the yield source regardless of shutdown.
    /// Returns what was actually freed; any shortfall is the ledger's loss.
    pub fn free_funds(&mut self, amount: u64) -> Result<u64, ProgramError> {
        if amount == 0 {
            return Ok(0);
        }

        let freed = self
            .env
            .yield_source
            .withdraw(&self.config.asset, amount, self.config.use_as_collateral)?;

        if freed < amount {
            msg!("Freed {} of {} requested, shortfall {}", freed, amount, amount - freed);
        } else {
            msg!("Freed {}", freed);
        }

        Ok(freed)
    }

    pub fn available_deposit_limit(&self) -> Result<u64, ProgramError> {
        if self.is_shutdown()? {
            return Ok(0);
        }

        let storage = self.asset_storage()?;
        match storage.supply_cap {
            None => Ok(u64::MAX),
            Some(cap) => Ok(cap
                .saturating_sub(storage.total_deposits)
                .saturating_sub(self.loose_balance()?)),
        }
    }

    /// Loose asset plus whatever part of the position the reserve can pay out now
    pub fn available_withdraw_limit(&self) -> Result<u64, ProgramError> {
        let storage = self.asset_storage()?;
        let withdrawable = self.position_value()?.min(storage.available_liquidity);

        self.loose_balance()?
            .checked_add(withdrawable)
            .ok_or_else(|| StrategyError::ArithmeticOverflow.into())
    }

    /// Pull funds out of the yield source after shutdown, capped at what the
    /// reserve can currently pay.
    pub fn emergency_withdraw(
        &mut self,
        ctx: &AuthorizationContext,
        amount: u64,
    ) -> Result<u64, ProgramError> {
        AccessPolicy::new(self.config).require(ctx, Role::EmergencyAuthorized)?;

        if !self.is_shutdown()? {
            return Err(StrategyError::NotShutdown.into());
        }

        let storage = self.asset_storage()?;
        let amount = amount
            .min(self.position_value()?)
            .min(storage.available_liquidity);

        msg!("Emergency withdraw of {}", amount);
        self.free_funds(amount)
    }
}
