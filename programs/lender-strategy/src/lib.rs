// Lender strategy: routes one asset into a lending yield source,
// liquidates incentive rewards through an auction, and reports total assets.
// Native Solana implementation - NO ANCHOR

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    pubkey::Pubkey,
};

pub mod access;
pub mod cpi;
pub mod engine;
pub mod error;
pub mod instruction;
pub mod interfaces;
pub mod processor;
pub mod state;

solana_program::declare_id!("DLendStrat1111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process);

pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    processor::process_instruction(program_id, accounts, instruction_data)
}
