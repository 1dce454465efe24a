use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::error::StrategyError;

/// Seed of the PDA that holds every strategy token account
pub const CUSTODY_SEED: &[u8] = b"custody";

/// Frozen strategy configuration, written once by `Initialize`
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    /// Account discriminator
    pub discriminator: [u8; 8],

    /// Is initialized flag
    pub is_initialized: bool,

    /// Roles
    pub management: Pubkey,
    pub keeper: Pubkey,
    pub emergency_admin: Pubkey,

    /// Authority of the outer ledger that owns deposits, withdrawals and reports
    pub ledger: Pubkey,

    /// Ledger account carrying the shutdown flag
    pub ledger_status: Pubkey,

    /// PDA owning the strategy token accounts
    pub custody: Pubkey,
    pub custody_bump: u8,

    /// Underlying asset mint
    pub asset: Pubkey,

    /// Receipt mint issued by the yield source
    pub share_token: Pubkey,

    /// Incentive reward mint
    pub reward_token: Pubkey,

    pub yield_source_program: Pubkey,

    /// Yield source reserve account for `asset`
    pub reserve: Pubkey,

    /// Passed through to the yield source on deposit and withdraw
    pub use_as_collateral: bool,

    /// None when the yield source distributes no incentives
    pub incentives_controller: Option<Pubkey>,

    pub auction_program: Pubkey,

    /// Auction account selling `reward_token` for `asset`
    pub auction: Pubkey,
}

/// Caller-supplied part of the configuration
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub keeper: Pubkey,
    pub emergency_admin: Pubkey,
    pub ledger: Pubkey,
    pub ledger_status: Pubkey,
    pub asset: Pubkey,
    pub share_token: Pubkey,
    pub reward_token: Pubkey,
    pub yield_source_program: Pubkey,
    pub reserve: Pubkey,
    pub use_as_collateral: bool,
    pub incentives_controller: Option<Pubkey>,
    pub auction_program: Pubkey,
    pub auction: Pubkey,
}

impl StrategyConfig {
    pub const DISCRIMINATOR: [u8; 8] = [76, 69, 78, 68, 95, 83, 84, 82]; // "LEND_STR"

    pub const LEN: usize = 8 + // discriminator
        1 + // is_initialized
        32 * 3 + // management, keeper, emergency_admin
        32 + 32 + // ledger, ledger_status
        32 + 1 + // custody, custody_bump
        32 * 3 + // asset, share_token, reward_token
        32 + 32 + // yield_source_program, reserve
        1 + // use_as_collateral
        1 + 32 + // incentives_controller
        32 + 32 + // auction_program, auction
        64; // padding

    /// Build the frozen configuration from initialization parameters
    pub fn new(
        management: Pubkey,
        custody: Pubkey,
        custody_bump: u8,
        params: StrategyParams,
    ) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            is_initialized: true,
            management,
            keeper: params.keeper,
            emergency_admin: params.emergency_admin,
            ledger: params.ledger,
            ledger_status: params.ledger_status,
            custody,
            custody_bump,
            asset: params.asset,
            share_token: params.share_token,
            reward_token: params.reward_token,
            yield_source_program: params.yield_source_program,
            reserve: params.reserve,
            use_as_collateral: params.use_as_collateral,
            incentives_controller: params.incentives_controller,
            auction_program: params.auction_program,
            auction: params.auction,
        }
    }

    pub fn find_custody_address(program_id: &Pubkey, config: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[CUSTODY_SEED, config.as_ref()], program_id)
    }

    /// Load a config from account data; trailing padding is ignored
    pub fn load(data: &[u8]) -> Result<Self, ProgramError> {
        let mut slice = data;
        let config = Self::deserialize(&mut slice)
            .map_err(|_| ProgramError::InvalidAccountData)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.discriminator != Self::DISCRIMINATOR {
            return Err(ProgramError::InvalidAccountData);
        }

        if !self.is_initialized {
            return Err(StrategyError::AccountNotInitialized.into());
        }

        // The asset is only ever the buy side of an auction
        if self.asset == self.reward_token
            || self.asset == self.share_token
            || self.share_token == self.reward_token
        {
            return Err(StrategyError::InvalidConfiguration.into());
        }

        Ok(())
    }
}
