// Collaborator interfaces
//
// Every balance the strategy accounts for lives behind one of these traits.
// The processor binds them to cross-program invocations, tests bind them to
// in-memory doubles. Each call is a suspension point: callers re-read any
// balance they need after it returns.

use solana_program::{
    entrypoint::ProgramResult,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::state::{AuctionStatus, HookFlags};

/// Aggregate reserve figures of the yield source for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStorage {
    pub total_deposits: u64,
    pub available_liquidity: u64,
    pub supply_cap: Option<u64>,
}

pub trait TokenLedger {
    fn balance_of(&self, mint: &Pubkey, owner: &Pubkey) -> Result<u64, ProgramError>;

    fn total_supply(&self, mint: &Pubkey) -> Result<u64, ProgramError>;
}

pub trait YieldSource {
    /// Move `amount` of `asset` from custody into the reserve, minting shares
    fn deposit(&mut self, asset: &Pubkey, amount: u64, use_as_collateral: bool) -> ProgramResult;

    /// Burn shares for up to `amount` of `asset`; returns the amount received
    fn withdraw(
        &mut self,
        asset: &Pubkey,
        amount: u64,
        use_as_collateral: bool,
    ) -> Result<u64, ProgramError>;

    fn asset_storage(&self, asset: &Pubkey) -> Result<AssetStorage, ProgramError>;
}

pub trait IncentivesController {
    fn get_rewards_balance(&self, assets: &[Pubkey], holder: &Pubkey) -> Result<u64, ProgramError>;

    /// Claim up to `amount` to `holder`; returns the amount claimed
    fn claim_rewards(
        &mut self,
        assets: &[Pubkey],
        amount: u64,
        holder: &Pubkey,
    ) -> Result<u64, ProgramError>;
}

pub trait AuctionModule {
    fn status(&self, from: &Pubkey) -> Result<AuctionStatus, ProgramError>;

    /// Start a sale of the custody balance of `from`; returns the amount put up
    fn kick(&mut self, from: &Pubkey) -> Result<u64, ProgramError>;

    fn hook_flags(&self) -> Result<HookFlags, ProgramError>;

    fn set_hook_flags(&mut self, flags: HookFlags) -> ProgramResult;
}

/// Read-only view of the outer ledger
pub trait StrategyHost {
    fn is_shutdown(&self) -> Result<bool, ProgramError>;
}
