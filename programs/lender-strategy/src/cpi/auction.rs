use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo,
    clock::Clock,
    entrypoint::ProgramResult,
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::Sysvar,
};

use crate::{
    cpi::token::token_amount,
    interfaces::AuctionModule,
    state::{
        external::{self, AuctionAccount},
        AuctionStatus, HookFlags,
    },
};

/// Auction program instructions
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum AuctionInstruction {
    /// Move the caller's balance of `from` into the auction and start it
    Kick {
        from: Pubkey,
    },
    /// Governance only
    SetHookFlags {
        flags: HookFlags,
    },
}

/// Auction bound to the custody PDA, which is also the auction's governance
pub struct CpiAuction<'a, 'info> {
    pub program: &'a AccountInfo<'info>,
    pub auction: &'a AccountInfo<'info>,
    pub custody: &'a AccountInfo<'info>,
    pub custody_rewards: &'a AccountInfo<'info>,
    pub auction_rewards: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [u8]],
}

impl<'a, 'info> CpiAuction<'a, 'info> {
    fn state(&self) -> Result<AuctionAccount, ProgramError> {
        external::deserialize(self.auction)
    }
}

impl<'a, 'info> AuctionModule for CpiAuction<'a, 'info> {
    fn status(&self, from: &Pubkey) -> Result<AuctionStatus, ProgramError> {
        let auction = self.state()?;
        if auction.from != *from {
            return Ok(AuctionStatus::Idle);
        }

        let now = Clock::get()?.unix_timestamp;
        Ok(AuctionStatus::resolve(
            auction.kicked,
            auction.auction_length,
            auction.available,
            now,
        ))
    }

    fn kick(&mut self, from: &Pubkey) -> Result<u64, ProgramError> {
        let instruction = Instruction::new_with_borsh(
            *self.program.key,
            &AuctionInstruction::Kick { from: *from },
            vec![
                AccountMeta::new(*self.auction.key, false),
                AccountMeta::new_readonly(*self.custody.key, true),
                AccountMeta::new(*self.custody_rewards.key, false),
                AccountMeta::new(*self.auction_rewards.key, false),
                AccountMeta::new_readonly(*self.token_program.key, false),
            ],
        );

        let before = token_amount(self.custody_rewards)?;
        invoke_signed(
            &instruction,
            &[
                self.auction.clone(),
                self.custody.clone(),
                self.custody_rewards.clone(),
                self.auction_rewards.clone(),
                self.token_program.clone(),
                self.program.clone(),
            ],
            &[self.signer_seeds],
        )?;
        let after = token_amount(self.custody_rewards)?;

        Ok(before.saturating_sub(after))
    }

    fn hook_flags(&self) -> Result<HookFlags, ProgramError> {
        Ok(self.state()?.hook_flags)
    }

    fn set_hook_flags(&mut self, flags: HookFlags) -> ProgramResult {
        let instruction = Instruction::new_with_borsh(
            *self.program.key,
            &AuctionInstruction::SetHookFlags { flags },
            vec![
                AccountMeta::new(*self.auction.key, false),
                AccountMeta::new_readonly(*self.custody.key, true),
            ],
        );

        invoke_signed(
            &instruction,
            &[self.auction.clone(), self.custody.clone(), self.program.clone()],
            &[self.signer_seeds],
        )
    }
}
