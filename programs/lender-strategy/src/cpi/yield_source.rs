use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    instruction::{AccountMeta, Instruction},
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    cpi::token::token_amount,
    error::StrategyError,
    interfaces::{AssetStorage, YieldSource},
    state::external::{self, ReserveState},
};

/// Yield source instructions
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum YieldSourceInstruction {
    /// Supply asset and receive shares
    Deposit {
        amount: u64,
        use_as_collateral: bool,
    },
    /// Burn shares and receive asset
    Withdraw {
        amount: u64,
        use_as_collateral: bool,
    },
}

pub struct CpiYieldSource<'a, 'info> {
    pub program: &'a AccountInfo<'info>,
    pub reserve: &'a AccountInfo<'info>,
    pub liquidity_vault: &'a AccountInfo<'info>,
    pub share_mint: &'a AccountInfo<'info>,
    pub custody: &'a AccountInfo<'info>,
    pub custody_asset: &'a AccountInfo<'info>,
    pub custody_shares: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [u8]],
}

impl<'a, 'info> CpiYieldSource<'a, 'info> {
    fn invoke(&self, data: &YieldSourceInstruction) -> ProgramResult {
        let instruction = Instruction::new_with_borsh(
            *self.program.key,
            data,
            vec![
                AccountMeta::new(*self.reserve.key, false),
                AccountMeta::new(*self.liquidity_vault.key, false),
                AccountMeta::new(*self.share_mint.key, false),
                AccountMeta::new_readonly(*self.custody.key, true),
                AccountMeta::new(*self.custody_asset.key, false),
                AccountMeta::new(*self.custody_shares.key, false),
                AccountMeta::new_readonly(*self.token_program.key, false),
            ],
        );

        invoke_signed(
            &instruction,
            &[
                self.reserve.clone(),
                self.liquidity_vault.clone(),
                self.share_mint.clone(),
                self.custody.clone(),
                self.custody_asset.clone(),
                self.custody_shares.clone(),
                self.token_program.clone(),
                self.program.clone(),
            ],
            &[self.signer_seeds],
        )
    }

    fn reserve_for(&self, asset: &Pubkey) -> Result<ReserveState, ProgramError> {
        let reserve: ReserveState = external::deserialize(self.reserve)?;
        if reserve.asset != *asset || reserve.share_mint != *self.share_mint.key {
            msg!("Reserve {} does not back {}", self.reserve.key, asset);
            return Err(StrategyError::AccountMismatch.into());
        }
        Ok(reserve)
    }
}

impl<'a, 'info> YieldSource for CpiYieldSource<'a, 'info> {
    fn deposit(&mut self, asset: &Pubkey, amount: u64, use_as_collateral: bool) -> ProgramResult {
        self.reserve_for(asset)?;
        self.invoke(&YieldSourceInstruction::Deposit { amount, use_as_collateral })
    }

    fn withdraw(
        &mut self,
        asset: &Pubkey,
        amount: u64,
        use_as_collateral: bool,
    ) -> Result<u64, ProgramError> {
        self.reserve_for(asset)?;

        let before = token_amount(self.custody_asset)?;
        self.invoke(&YieldSourceInstruction::Withdraw { amount, use_as_collateral })?;
        let after = token_amount(self.custody_asset)?;

        Ok(after.saturating_sub(before))
    }

    fn asset_storage(&self, asset: &Pubkey) -> Result<AssetStorage, ProgramError> {
        let reserve = self.reserve_for(asset)?;
        Ok(AssetStorage {
            total_deposits: reserve.total_deposits,
            available_liquidity: reserve.available_liquidity,
            supply_cap: (reserve.supply_cap > 0).then_some(reserve.supply_cap),
        })
    }
}
