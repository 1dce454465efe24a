use solana_program::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{error::StrategyError, state::StrategyConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Management,
    /// Management or the emergency admin
    EmergencyAuthorized,
    /// Management or the keeper
    Keeper,
    /// The outer ledger
    Ledger,
    /// The configured auction
    Auction,
}

/// Who is calling and whether they signed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub caller: Pubkey,
    pub is_signer: bool,
}

impl AuthorizationContext {
    pub fn new(caller: Pubkey, is_signer: bool) -> Self {
        Self { caller, is_signer }
    }

    pub fn from_account(account: &AccountInfo) -> Self {
        Self::new(*account.key, account.is_signer)
    }
}

pub struct AccessPolicy<'a> {
    config: &'a StrategyConfig,
}

impl<'a> AccessPolicy<'a> {
    pub fn new(config: &'a StrategyConfig) -> Self {
        Self { config }
    }

    pub fn holds(&self, caller: &Pubkey, role: Role) -> bool {
        let config = self.config;
        match role {
            Role::Management => *caller == config.management,
            Role::EmergencyAuthorized => {
                *caller == config.management || *caller == config.emergency_admin
            }
            Role::Keeper => *caller == config.management || *caller == config.keeper,
            Role::Ledger => *caller == config.ledger,
            Role::Auction => *caller == config.auction,
        }
    }

    pub fn require(&self, ctx: &AuthorizationContext, role: Role) -> Result<(), ProgramError> {
        if !ctx.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if !self.holds(&ctx.caller, role) {
            msg!("{} does not hold role {:?}", ctx.caller, role);
            return Err(StrategyError::Unauthorized.into());
        }

        Ok(())
    }

    /// Pass if the caller holds any of `roles`
    pub fn require_any(&self, ctx: &AuthorizationContext, roles: &[Role]) -> Result<(), ProgramError> {
        if !ctx.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if roles.iter().any(|role| self.holds(&ctx.caller, *role)) {
            Ok(())
        } else {
            msg!("{} holds none of {:?}", ctx.caller, roles);
            Err(StrategyError::Unauthorized.into())
        }
    }
}
