// Strategy engine
//
// `LenderStrategy` ties the frozen configuration to its collaborators and
// implements the position ledger, reward harvester, auction liquidation and
// accounting reporter on top of them.

pub mod harvester;
pub mod liquidation;
pub mod position;
pub mod reporter;

use solana_program::program_error::ProgramError;

use crate::{
    interfaces::{AuctionModule, IncentivesController, StrategyHost, TokenLedger, YieldSource},
    state::StrategyConfig,
};

pub use position::shares_to_assets;

/// Collaborators bound for the duration of one call
pub struct Collaborators<'a> {
    pub tokens: &'a dyn TokenLedger,
    pub yield_source: &'a mut dyn YieldSource,
    pub incentives: Option<&'a mut dyn IncentivesController>,
    pub auction: &'a mut dyn AuctionModule,
    pub host: &'a dyn StrategyHost,
}

pub struct LenderStrategy<'a> {
    config: &'a StrategyConfig,
    env: Collaborators<'a>,
}

impl<'a> LenderStrategy<'a> {
    pub fn new(config: &'a StrategyConfig, env: Collaborators<'a>) -> Self {
        Self { config, env }
    }

    pub fn config(&self) -> &StrategyConfig {
        self.config
    }

    pub fn is_shutdown(&self) -> Result<bool, ProgramError> {
        self.env.host.is_shutdown()
    }

    /// Underlying asset held directly by custody
    pub fn loose_balance(&self) -> Result<u64, ProgramError> {
        self.env.tokens.balance_of(&self.config.asset, &self.config.custody)
    }

    pub fn share_balance(&self) -> Result<u64, ProgramError> {
        self.env.tokens.balance_of(&self.config.share_token, &self.config.custody)
    }

    pub fn reward_balance(&self) -> Result<u64, ProgramError> {
        self.env.tokens.balance_of(&self.config.reward_token, &self.config.custody)
    }
}
