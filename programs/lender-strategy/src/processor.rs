use borsh::BorshSerialize;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, set_return_data},
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    system_instruction,
    sysvar::{rent::Rent, Sysvar},
};
use spl_token::state::Account as TokenAccount;

use crate::{
    access::{AccessPolicy, AuthorizationContext, Role},
    cpi::{CpiAuction, CpiIncentivesController, CpiYieldSource, LedgerStatusHost, SplTokenLedger},
    engine::{Collaborators, LenderStrategy},
    error::StrategyError,
    instruction::StrategyInstruction,
    interfaces::IncentivesController,
    state::{StrategyConfig, StrategyParams, CUSTODY_SEED},
};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = StrategyInstruction::unpack(instruction_data)?;

    match instruction {
        StrategyInstruction::Initialize { params } => {
            msg!("Instruction: Initialize");
            process_initialize(program_id, accounts, params)
        }

        StrategyInstruction::DeployFunds { amount } => {
            msg!("Instruction: DeployFunds");
            with_strategy(program_id, accounts, &[Role::Ledger], |strategy, _| {
                strategy.deploy_funds(amount)
            })
        }

        StrategyInstruction::FreeFunds { amount } => {
            msg!("Instruction: FreeFunds");
            with_strategy(program_id, accounts, &[Role::Ledger], |strategy, _| {
                let freed = strategy.free_funds(amount)?;
                set_return_data(&freed.to_le_bytes());
                Ok(())
            })
        }

        StrategyInstruction::HarvestAndReport => {
            msg!("Instruction: HarvestAndReport");
            with_strategy(program_id, accounts, &[Role::Ledger, Role::Keeper], |strategy, _| {
                let total_assets = strategy.harvest_and_report()?;
                set_return_data(&total_assets.to_le_bytes());
                Ok(())
            })
        }

        StrategyInstruction::OnPostTake { token, amount_taken, amount_paid } => {
            msg!("Instruction: OnPostTake");
            with_strategy(program_id, accounts, &[], |strategy, ctx| {
                strategy.on_post_take(ctx, &token, amount_taken, amount_paid)
            })
        }

        StrategyInstruction::SetPostTakeHookFlag { enabled } => {
            msg!("Instruction: SetPostTakeHookFlag");
            with_strategy(program_id, accounts, &[], |strategy, ctx| {
                strategy.set_post_take_hook_flag(ctx, enabled).map(|_| ())
            })
        }

        StrategyInstruction::EmergencyWithdraw { amount } => {
            msg!("Instruction: EmergencyWithdraw");
            with_strategy(program_id, accounts, &[], |strategy, ctx| {
                let freed = strategy.emergency_withdraw(ctx, amount)?;
                set_return_data(&freed.to_le_bytes());
                Ok(())
            })
        }

        StrategyInstruction::KickAuction { token } => {
            msg!("Instruction: KickAuction");
            with_strategy(program_id, accounts, &[], |strategy, ctx| {
                let kicked = strategy.kick_auction(ctx, &token)?;
                set_return_data(&kicked.to_le_bytes());
                Ok(())
            })
        }
    }
}

/// Create the frozen config account
fn process_initialize(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    params: StrategyParams,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let management_info = next_account_info(account_info_iter)?;
    let config_info = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;

    if !management_info.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    if !config_info.data_is_empty() {
        return Err(StrategyError::AccountAlreadyInitialized.into());
    }

    let (custody, custody_bump) =
        StrategyConfig::find_custody_address(program_id, config_info.key);
    let config = StrategyConfig::new(*management_info.key, custody, custody_bump, params);
    config.validate()?;

    let rent = Rent::get()?;
    invoke(
        &system_instruction::create_account(
            management_info.key,
            config_info.key,
            rent.minimum_balance(StrategyConfig::LEN),
            StrategyConfig::LEN as u64,
            program_id,
        ),
        &[
            management_info.clone(),
            config_info.clone(),
            system_program.clone(),
        ],
    )?;

    config.serialize(&mut &mut config_info.try_borrow_mut_data()?[..])?;

    msg!(
        "Strategy initialized: asset {}, reward {}, custody {}",
        config.asset,
        config.reward_token,
        config.custody
    );

    Ok(())
}

fn expect_key(account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    if account.key != expected {
        msg!("Expected account {}, got {}", expected, account.key);
        return Err(StrategyError::AccountMismatch.into());
    }
    Ok(())
}

/// Custody token accounts must hold the expected mint and belong to custody
fn expect_custody_token_account(
    account: &AccountInfo,
    mint: &Pubkey,
    custody: &Pubkey,
) -> ProgramResult {
    if account.owner != &spl_token::id() {
        return Err(ProgramError::IncorrectProgramId);
    }

    let state = TokenAccount::unpack(&account.try_borrow_data()?)?;
    if state.mint != *mint || state.owner != *custody {
        msg!("Token account {} is not a custody account for {}", account.key, mint);
        return Err(StrategyError::AccountMismatch.into());
    }
    Ok(())
}

/// Load the shared account list, apply the entry `gate` and run `f` against a
/// strategy bound to CPI collaborators. An empty gate leaves authorization to
/// the engine operation itself.
fn with_strategy<F>(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    gate: &[Role],
    f: F,
) -> ProgramResult
where
    F: FnOnce(&mut LenderStrategy<'_>, &AuthorizationContext) -> ProgramResult,
{
    let account_info_iter = &mut accounts.iter();

    let caller_info = next_account_info(account_info_iter)?;
    let config_info = next_account_info(account_info_iter)?;

    if config_info.owner != program_id {
        return Err(ProgramError::IncorrectProgramId);
    }
    let config = StrategyConfig::load(&config_info.try_borrow_data()?)?;

    let ctx = AuthorizationContext::from_account(caller_info);
    if !gate.is_empty() {
        AccessPolicy::new(&config).require_any(&ctx, gate)?;
    }

    let custody_info = next_account_info(account_info_iter)?;
    let custody_asset_info = next_account_info(account_info_iter)?;
    let custody_shares_info = next_account_info(account_info_iter)?;
    let custody_rewards_info = next_account_info(account_info_iter)?;
    let share_mint_info = next_account_info(account_info_iter)?;
    let ledger_status_info = next_account_info(account_info_iter)?;
    let yield_source_program = next_account_info(account_info_iter)?;
    let reserve_info = next_account_info(account_info_iter)?;
    let liquidity_vault_info = next_account_info(account_info_iter)?;
    let auction_program = next_account_info(account_info_iter)?;
    let auction_info = next_account_info(account_info_iter)?;
    let auction_rewards_info = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    expect_key(custody_info, &config.custody)?;
    expect_key(share_mint_info, &config.share_token)?;
    expect_key(ledger_status_info, &config.ledger_status)?;
    expect_key(yield_source_program, &config.yield_source_program)?;
    expect_key(reserve_info, &config.reserve)?;
    expect_key(auction_program, &config.auction_program)?;
    expect_key(auction_info, &config.auction)?;
    expect_key(token_program, &spl_token::id())?;

    expect_custody_token_account(custody_asset_info, &config.asset, &config.custody)?;
    expect_custody_token_account(custody_shares_info, &config.share_token, &config.custody)?;
    expect_custody_token_account(custody_rewards_info, &config.reward_token, &config.custody)?;

    let bump = [config.custody_bump];
    let signer_seeds: &[&[u8]] = &[CUSTODY_SEED, config_info.key.as_ref(), &bump];

    let token_accounts = [custody_asset_info, custody_shares_info, custody_rewards_info];
    let mints = [share_mint_info];
    let tokens = SplTokenLedger::new(&token_accounts, &mints);

    let mut yield_source = CpiYieldSource {
        program: yield_source_program,
        reserve: reserve_info,
        liquidity_vault: liquidity_vault_info,
        share_mint: share_mint_info,
        custody: custody_info,
        custody_asset: custody_asset_info,
        custody_shares: custody_shares_info,
        token_program,
        signer_seeds,
    };

    let mut auction = CpiAuction {
        program: auction_program,
        auction: auction_info,
        custody: custody_info,
        custody_rewards: custody_rewards_info,
        auction_rewards: auction_rewards_info,
        token_program,
        signer_seeds,
    };

    let host = LedgerStatusHost {
        status: ledger_status_info,
        strategy: *config_info.key,
    };

    let mut incentives = match config.incentives_controller {
        Some(controller) => {
            let program = next_account_info(account_info_iter)?;
            let rewards_account = next_account_info(account_info_iter)?;
            let rewards_vault = next_account_info(account_info_iter)?;
            expect_key(program, &controller)?;

            Some(CpiIncentivesController {
                program,
                rewards_account,
                rewards_vault,
                custody: custody_info,
                custody_rewards: custody_rewards_info,
                token_program,
                reward_mint: config.reward_token,
                signer_seeds,
            })
        }
        None => None,
    };

    let incentives: Option<&mut dyn IncentivesController> = match incentives.as_mut() {
        Some(controller) => Some(controller as &mut dyn IncentivesController),
        None => None,
    };

    let env = Collaborators {
        tokens: &tokens,
        yield_source: &mut yield_source,
        incentives,
        auction: &mut auction,
        host: &host,
    };

    let mut strategy = LenderStrategy::new(&config, env);
    f(&mut strategy, &ctx)
}
