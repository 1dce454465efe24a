use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    instruction::{AccountMeta, Instruction},
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    cpi::token::token_amount,
    error::StrategyError,
    interfaces::IncentivesController,
    state::external::{self, RewardsAccount},
};

/// Incentives controller instructions
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum IncentivesInstruction {
    /// Claim up to `amount` rewards accrued on `assets`
    ClaimRewards {
        assets: Vec<Pubkey>,
        amount: u64,
    },
}

pub struct CpiIncentivesController<'a, 'info> {
    pub program: &'a AccountInfo<'info>,
    pub rewards_account: &'a AccountInfo<'info>,
    pub rewards_vault: &'a AccountInfo<'info>,
    pub custody: &'a AccountInfo<'info>,
    pub custody_rewards: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub reward_mint: Pubkey,
    pub signer_seeds: &'a [&'a [u8]],
}

/// Decode a rewards account, which must be owned by `controller` and accrue
/// `reward_mint` for `holder`
pub fn load_rewards_account(
    account: &AccountInfo,
    controller: &Pubkey,
    holder: &Pubkey,
    reward_mint: &Pubkey,
) -> Result<RewardsAccount, ProgramError> {
    if account.owner != controller {
        msg!("Rewards account {} not owned by {}", account.key, controller);
        return Err(ProgramError::IncorrectProgramId);
    }

    let rewards: RewardsAccount = external::deserialize(account)?;
    if rewards.holder != *holder || rewards.reward_mint != *reward_mint {
        msg!("Rewards account {} does not pay {} to {}", account.key, reward_mint, holder);
        return Err(StrategyError::AccountMismatch.into());
    }
    Ok(rewards)
}

impl<'a, 'info> CpiIncentivesController<'a, 'info> {
    fn rewards_of(&self, holder: &Pubkey) -> Result<RewardsAccount, ProgramError> {
        load_rewards_account(self.rewards_account, self.program.key, holder, &self.reward_mint)
    }
}

impl<'a, 'info> IncentivesController for CpiIncentivesController<'a, 'info> {
    fn get_rewards_balance(&self, assets: &[Pubkey], holder: &Pubkey) -> Result<u64, ProgramError> {
        let rewards = self.rewards_of(holder)?;
        if assets.contains(&rewards.asset) {
            Ok(rewards.unclaimed)
        } else {
            Ok(0)
        }
    }

    fn claim_rewards(
        &mut self,
        assets: &[Pubkey],
        amount: u64,
        holder: &Pubkey,
    ) -> Result<u64, ProgramError> {
        if holder != self.custody.key {
            return Err(StrategyError::AccountMismatch.into());
        }
        self.rewards_of(holder)?;

        let instruction = Instruction::new_with_borsh(
            *self.program.key,
            &IncentivesInstruction::ClaimRewards {
                assets: assets.to_vec(),
                amount,
            },
            vec![
                AccountMeta::new(*self.rewards_account.key, false),
                AccountMeta::new(*self.rewards_vault.key, false),
                AccountMeta::new_readonly(*self.custody.key, true),
                AccountMeta::new(*self.custody_rewards.key, false),
                AccountMeta::new_readonly(*self.token_program.key, false),
            ],
        );

        let before = token_amount(self.custody_rewards)?;
        invoke_signed(
            &instruction,
            &[
                self.rewards_account.clone(),
                self.rewards_vault.clone(),
                self.custody.clone(),
                self.custody_rewards.clone(),
                self.token_program.clone(),
                self.program.clone(),
            ],
            &[self.signer_seeds],
        )?;
        let after = token_amount(self.custody_rewards)?;

        Ok(after.saturating_sub(before))
    }
}
