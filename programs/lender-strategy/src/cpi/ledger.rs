use solana_program::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    error::StrategyError,
    interfaces::StrategyHost,
    state::external::{self, LedgerStatus},
};

/// Shutdown flag read from the outer ledger's status account
pub struct LedgerStatusHost<'a, 'info> {
    pub status: &'a AccountInfo<'info>,
    pub strategy: Pubkey,
}

impl<'a, 'info> StrategyHost for LedgerStatusHost<'a, 'info> {
    fn is_shutdown(&self) -> Result<bool, ProgramError> {
        let status: LedgerStatus = external::deserialize(self.status)?;
        if status.strategy != self.strategy {
            return Err(StrategyError::AccountMismatch.into());
        }

        Ok(status.is_shutdown)
    }
}
