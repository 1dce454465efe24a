use solana_program::{
    account_info::AccountInfo,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
};
use spl_token::state::{Account as TokenAccount, Mint};

use crate::{error::StrategyError, interfaces::TokenLedger};

/// Amount held by an SPL token account
pub fn token_amount(account: &AccountInfo) -> Result<u64, ProgramError> {
    if account.owner != &spl_token::id() {
        return Err(ProgramError::IncorrectProgramId);
    }
    let state = TokenAccount::unpack(&account.try_borrow_data()?)?;
    Ok(state.amount)
}

/// Balances read straight from the SPL token accounts passed to the
/// instruction. Data is re-read on every call, so balances moved by an
/// earlier CPI are always current.
pub struct SplTokenLedger<'a, 'info> {
    token_accounts: &'a [&'a AccountInfo<'info>],
    mints: &'a [&'a AccountInfo<'info>],
}

impl<'a, 'info> SplTokenLedger<'a, 'info> {
    pub fn new(
        token_accounts: &'a [&'a AccountInfo<'info>],
        mints: &'a [&'a AccountInfo<'info>],
    ) -> Self {
        Self { token_accounts, mints }
    }
}

impl<'a, 'info> TokenLedger for SplTokenLedger<'a, 'info> {
    fn balance_of(&self, mint: &Pubkey, owner: &Pubkey) -> Result<u64, ProgramError> {
        for account in self.token_accounts {
            if account.owner != &spl_token::id() {
                continue;
            }

            let state = TokenAccount::unpack(&account.try_borrow_data()?)?;
            if state.mint == *mint && state.owner == *owner {
                return Ok(state.amount);
            }
        }

        Err(StrategyError::AccountMismatch.into())
    }

    fn total_supply(&self, mint: &Pubkey) -> Result<u64, ProgramError> {
        let account = self
            .mints
            .iter()
            .find(|account| account.key == mint)
            .ok_or(StrategyError::AccountMismatch)?;

        if account.owner != &spl_token::id() {
            return Err(ProgramError::IncorrectProgramId);
        }

        Ok(Mint::unpack(&account.try_borrow_data()?)?.supply)
    }
}
