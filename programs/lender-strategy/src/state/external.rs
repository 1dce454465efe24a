// Account layouts owned by other programs. Read only, never written here.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{error::StrategyError, state::HookFlags};

/// Yield source reserve for one asset
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct ReserveState {
    pub asset: Pubkey,
    pub share_mint: Pubkey,
    /// Asset owed to all share holders, interest included
    pub total_deposits: u64,
    /// Asset that can be withdrawn right now
    pub available_liquidity: u64,
    /// 0 means uncapped
    pub supply_cap: u64,
}

/// Incentives controller accrual for one holder of one asset
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct RewardsAccount {
    pub holder: Pubkey,
    pub asset: Pubkey,
    pub reward_mint: Pubkey,
    pub unclaimed: u64,
    pub last_update: i64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct AuctionAccount {
    /// Token the auction buys
    pub want: Pubkey,
    pub receiver: Pubkey,
    /// Token being sold
    pub from: Pubkey,
    pub hook_flags: HookFlags,
    /// Unix timestamp of the last kick, 0 if never kicked
    pub kicked: i64,
    pub auction_length: i64,
    /// Unsold amount of `from`
    pub available: u64,
}

/// Outer ledger's view of this strategy
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct LedgerStatus {
    pub strategy: Pubkey,
    pub is_shutdown: bool,
}

/// Deserialize an external account, ignoring trailing bytes
pub fn deserialize<T: BorshDeserialize>(account: &AccountInfo) -> Result<T, ProgramError> {
    let data = account.try_borrow_data()?;
    let mut slice = &data[..];
    T::deserialize(&mut slice).map_err(|_| StrategyError::InvalidExternalAccount.into())
}
