use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{error::StrategyError, state::StrategyParams};

/// Every instruction except `Initialize` takes the same account list:
///
/// 0. `[signer]` Caller
/// 1. `[]` Strategy config account
/// 2. `[]` Custody PDA
/// 3. `[writable]` Custody asset token account
/// 4. `[writable]` Custody share token account
/// 5. `[writable]` Custody reward token account
/// 6. `[writable]` Share mint
/// 7. `[]` Ledger status account
/// 8. `[]` Yield source program
/// 9. `[writable]` Yield source reserve
/// 10. `[writable]` Reserve liquidity vault
/// 11. `[]` Auction program
/// 12. `[writable]` Auction account
/// 13. `[writable]` Auction reward token account
/// 14. `[]` Token program
/// 15. `[]` Incentives controller program (only if configured)
/// 16. `[writable]` Incentives rewards account (only if configured)
/// 17. `[writable]` Incentives rewards vault (only if configured)
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum StrategyInstruction {
    /// Create the strategy config account
    /// Accounts:
    /// 0. `[signer, writable]` Management (payer)
    /// 1. `[signer, writable]` Strategy config account
    /// 2. `[]` System program
    Initialize {
        params: StrategyParams,
    },

    /// Deposit into the yield source. Caller: ledger
    DeployFunds {
        amount: u64,
    },

    /// Withdraw from the yield source; freed amount as return data. Caller: ledger
    FreeFunds {
        amount: u64,
    },

    /// Harvest, redeploy and report; total assets as return data.
    /// Caller: ledger or keeper
    HarvestAndReport,

    /// Auction fill callback. Caller: auction
    OnPostTake {
        token: Pubkey,
        amount_taken: u64,
        amount_paid: u64,
    },

    /// Caller: management
    SetPostTakeHookFlag {
        enabled: bool,
    },

    /// Withdraw after shutdown. Caller: management or emergency admin
    EmergencyWithdraw {
        amount: u64,
    },

    /// Auction the custody balance of `token`; amount kicked as return data.
    /// Caller: keeper or management
    KickAuction {
        token: Pubkey,
    },
}

impl StrategyInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| StrategyError::InvalidInstruction.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncentivesAccountKeys {
    pub program: Pubkey,
    pub rewards_account: Pubkey,
    pub rewards_vault: Pubkey,
}

/// Keys of the shared account list
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyAccountKeys {
    pub config: Pubkey,
    pub custody: Pubkey,
    pub custody_asset: Pubkey,
    pub custody_shares: Pubkey,
    pub custody_rewards: Pubkey,
    pub share_mint: Pubkey,
    pub ledger_status: Pubkey,
    pub yield_source_program: Pubkey,
    pub reserve: Pubkey,
    pub liquidity_vault: Pubkey,
    pub auction_program: Pubkey,
    pub auction: Pubkey,
    pub auction_rewards: Pubkey,
    pub incentives: Option<IncentivesAccountKeys>,
}

impl StrategyAccountKeys {
    pub fn to_account_metas(&self, caller: &Pubkey) -> Vec<AccountMeta> {
        let mut accounts = vec![
            AccountMeta::new_readonly(*caller, true),
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new_readonly(self.custody, false),
            AccountMeta::new(self.custody_asset, false),
            AccountMeta::new(self.custody_shares, false),
            AccountMeta::new(self.custody_rewards, false),
            AccountMeta::new(self.share_mint, false),
            AccountMeta::new_readonly(self.ledger_status, false),
            AccountMeta::new_readonly(self.yield_source_program, false),
            AccountMeta::new(self.reserve, false),
            AccountMeta::new(self.liquidity_vault, false),
            AccountMeta::new_readonly(self.auction_program, false),
            AccountMeta::new(self.auction, false),
            AccountMeta::new(self.auction_rewards, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ];

        if let Some(incentives) = &self.incentives {
            accounts.push(AccountMeta::new_readonly(incentives.program, false));
            accounts.push(AccountMeta::new(incentives.rewards_account, false));
            accounts.push(AccountMeta::new(incentives.rewards_vault, false));
        }

        accounts
    }
}

// Helper functions to create instructions
pub fn initialize(
    program_id: &Pubkey,
    management: &Pubkey,
    config_account: &Pubkey,
    params: StrategyParams,
) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &StrategyInstruction::Initialize { params },
        vec![
            AccountMeta::new(*management, true),
            AccountMeta::new(*config_account, true),
            AccountMeta::new_readonly(solana_program::system_program::id(), false),
        ],
    )
}

fn strategy_instruction(
    program_id: &Pubkey,
    caller: &Pubkey,
    keys: &StrategyAccountKeys,
    data: StrategyInstruction,
) -> Instruction {
    Instruction::new_with_borsh(*program_id, &data, keys.to_account_metas(caller))
}

pub fn deploy_funds(program_id: &Pubkey, ledger: &Pubkey, keys: &StrategyAccountKeys, amount: u64) -> Instruction {
    strategy_instruction(program_id, ledger, keys, StrategyInstruction::DeployFunds { amount })
}

pub fn free_funds(program_id: &Pubkey, ledger: &Pubkey, keys: &StrategyAccountKeys, amount: u64) -> Instruction {
    strategy_instruction(program_id, ledger, keys, StrategyInstruction::FreeFunds { amount })
}

pub fn harvest_and_report(program_id: &Pubkey, caller: &Pubkey, keys: &StrategyAccountKeys) -> Instruction {
    strategy_instruction(program_id, caller, keys, StrategyInstruction::HarvestAndReport)
}

pub fn on_post_take(
    program_id: &Pubkey,
    auction: &Pubkey,
    keys: &StrategyAccountKeys,
    token: Pubkey,
    amount_taken: u64,
    amount_paid: u64,
) -> Instruction {
    strategy_instruction(
        program_id,
        auction,
        keys,
        StrategyInstruction::OnPostTake { token, amount_taken, amount_paid },
    )
}

pub fn set_post_take_hook_flag(
    program_id: &Pubkey,
    management: &Pubkey,
    keys: &StrategyAccountKeys,
    enabled: bool,
) -> Instruction {
    strategy_instruction(program_id, management, keys, StrategyInstruction::SetPostTakeHookFlag { enabled })
}

pub fn emergency_withdraw(
    program_id: &Pubkey,
    caller: &Pubkey,
    keys: &StrategyAccountKeys,
    amount: u64,
) -> Instruction {
    strategy_instruction(program_id, caller, keys, StrategyInstruction::EmergencyWithdraw { amount })
}

pub fn kick_auction(
    program_id: &Pubkey,
    keeper: &Pubkey,
    keys: &StrategyAccountKeys,
    token: Pubkey,
) -> Instruction {
    strategy_instruction(program_id, keeper, keys, StrategyInstruction::KickAuction { token })
}
