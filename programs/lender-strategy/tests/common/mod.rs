// In-memory chain standing in for the yield source, incentives controller,
// auction and outer ledger.

#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use lender_strategy::{
    engine::{Collaborators, LenderStrategy},
    interfaces::{
        AssetStorage, AuctionModule, IncentivesController, StrategyHost, TokenLedger, YieldSource,
    },
    state::{AuctionStatus, HookFlags, StrategyConfig, StrategyParams},
};
use solana_program::{
    entrypoint::ProgramResult,
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// Error code used when a double is told to fail
pub const INJECTED_FAILURE: u32 = 9_999;

#[derive(Debug, Default)]
pub struct Chain {
    pub balances: HashMap<(Pubkey, Pubkey), u64>,
    pub share_supply: u64,
    pub total_deposits: u64,
    /// None means all deposits are withdrawable
    pub available_liquidity: Option<u64>,
    pub supply_cap: Option<u64>,

    pub claimable: u64,
    pub shutdown: bool,
    pub auction_status: Option<AuctionStatus>,
    pub hook_flags: HookFlags,

    pub fail_claim: bool,
    pub fail_deposit: bool,
    pub reject_kick: bool,

    pub deposit_calls: u32,
    pub withdraw_calls: u32,
    pub claim_calls: u32,
    pub kick_calls: u32,
    pub reward_queries: u32,
}

impl Chain {
    pub fn balance(&self, mint: &Pubkey, owner: &Pubkey) -> u64 {
        self.balances.get(&(*mint, *owner)).copied().unwrap_or(0)
    }

    pub fn set_balance(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) {
        self.balances.insert((*mint, *owner), amount);
    }

    fn credit(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) {
        let balance = self.balance(mint, owner);
        self.set_balance(mint, owner, balance + amount);
    }

    fn debit(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> ProgramResult {
        let balance = self.balance(mint, owner);
        if balance < amount {
            return Err(ProgramError::InsufficientFunds);
        }
        self.set_balance(mint, owner, balance - amount);
        Ok(())
    }
}

pub type SharedChain = Rc<RefCell<Chain>>;

/// Keys of every party in the fixture
#[derive(Debug, Clone)]
pub struct Keys {
    pub management: Pubkey,
    pub keeper: Pubkey,
    pub emergency_admin: Pubkey,
    pub ledger: Pubkey,
    pub auction: Pubkey,
    pub outsider: Pubkey,
    pub reserve_vault: Pubkey,
    pub auction_vault: Pubkey,
}

pub struct MockTokens {
    chain: SharedChain,
}

impl TokenLedger for MockTokens {
    fn balance_of(&self, mint: &Pubkey, owner: &Pubkey) -> Result<u64, ProgramError> {
        Ok(self.chain.borrow().balance(mint, owner))
    }

    fn total_supply(&self, _mint: &Pubkey) -> Result<u64, ProgramError> {
        Ok(self.chain.borrow().share_supply)
    }
}

pub struct MockYieldSource {
    chain: SharedChain,
    config: StrategyConfig,
    vault: Pubkey,
}

impl YieldSource for MockYieldSource {
    fn deposit(&mut self, asset: &Pubkey, amount: u64, _use_as_collateral: bool) -> ProgramResult {
        let mut chain = self.chain.borrow_mut();
        chain.deposit_calls += 1;
        if chain.fail_deposit {
            return Err(ProgramError::Custom(INJECTED_FAILURE));
        }

        let custody = self.config.custody;
        chain.debit(asset, &custody, amount)?;
        chain.credit(asset, &self.vault, amount);

        let minted = if chain.share_supply == 0 || chain.total_deposits == 0 {
            amount
        } else {
            (amount as u128 * chain.share_supply as u128 / chain.total_deposits as u128) as u64
        };
        chain.credit(&self.config.share_token, &custody, minted);
        chain.share_supply += minted;
        chain.total_deposits += amount;
        if let Some(liquidity) = chain.available_liquidity.as_mut() {
            *liquidity += amount;
        }
        Ok(())
    }

    fn withdraw(
        &mut self,
        asset: &Pubkey,
        amount: u64,
        _use_as_collateral: bool,
    ) -> Result<u64, ProgramError> {
        let mut chain = self.chain.borrow_mut();
        chain.withdraw_calls += 1;

        let custody = self.config.custody;
        let shares = chain.balance(&self.config.share_token, &custody);
        let position = if chain.share_supply == 0 {
            0
        } else {
            (shares as u128 * chain.total_deposits as u128 / chain.share_supply as u128) as u64
        };
        let liquidity = chain.available_liquidity.unwrap_or(chain.total_deposits);
        let freed = amount.min(position).min(liquidity);
        if freed == 0 {
            return Ok(0);
        }

        // Round the burn up so the pool never loses value
        let burned = ((freed as u128 * chain.share_supply as u128 + chain.total_deposits as u128 - 1)
            / chain.total_deposits as u128) as u64;
        chain.debit(&self.config.share_token, &custody, burned.min(shares))?;
        chain.share_supply -= burned.min(shares);
        chain.total_deposits -= freed;
        if let Some(liquidity) = chain.available_liquidity.as_mut() {
            *liquidity -= freed;
        }
        chain.debit(asset, &self.vault, freed)?;
        chain.credit(asset, &custody, freed);
        Ok(freed)
    }

    fn asset_storage(&self, _asset: &Pubkey) -> Result<AssetStorage, ProgramError> {
        let chain = self.chain.borrow();
        Ok(AssetStorage {
            total_deposits: chain.total_deposits,
            available_liquidity: chain.available_liquidity.unwrap_or(chain.total_deposits),
            supply_cap: chain.supply_cap,
        })
    }
}

pub struct MockIncentives {
    chain: SharedChain,
    config: StrategyConfig,
}

impl IncentivesController for MockIncentives {
    fn get_rewards_balance(&self, assets: &[Pubkey], holder: &Pubkey) -> Result<u64, ProgramError> {
        let mut chain = self.chain.borrow_mut();
        chain.reward_queries += 1;
        if *holder != self.config.custody || !assets.contains(&self.config.share_token) {
            return Ok(0);
        }
        Ok(chain.claimable)
    }

    fn claim_rewards(
        &mut self,
        _assets: &[Pubkey],
        amount: u64,
        holder: &Pubkey,
    ) -> Result<u64, ProgramError> {
        let mut chain = self.chain.borrow_mut();
        chain.claim_calls += 1;
        if chain.fail_claim {
            return Err(ProgramError::Custom(INJECTED_FAILURE));
        }

        let claimed = amount.min(chain.claimable);
        chain.claimable -= claimed;
        chain.credit(&self.config.reward_token, holder, claimed);
        Ok(claimed)
    }
}

pub struct MockAuction {
    chain: SharedChain,
    config: StrategyConfig,
    vault: Pubkey,
}

impl AuctionModule for MockAuction {
    fn status(&self, _from: &Pubkey) -> Result<AuctionStatus, ProgramError> {
        Ok(self.chain.borrow().auction_status.unwrap_or(AuctionStatus::Idle))
    }

    fn kick(&mut self, from: &Pubkey) -> Result<u64, ProgramError> {
        let mut chain = self.chain.borrow_mut();
        chain.kick_calls += 1;
        if chain.reject_kick || matches!(chain.auction_status, Some(AuctionStatus::Kicked { .. })) {
            return Err(ProgramError::Custom(INJECTED_FAILURE));
        }

        let custody = self.config.custody;
        let amount = chain.balance(from, &custody);
        chain.debit(from, &custody, amount)?;
        chain.credit(from, &self.vault, amount);
        chain.auction_status = Some(AuctionStatus::Kicked { available: amount, kicked_at: 1 });
        Ok(amount)
    }

    fn hook_flags(&self) -> Result<HookFlags, ProgramError> {
        Ok(self.chain.borrow().hook_flags)
    }

    fn set_hook_flags(&mut self, flags: HookFlags) -> ProgramResult {
        self.chain.borrow_mut().hook_flags = flags;
        Ok(())
    }
}

pub struct MockHost {
    chain: SharedChain,
}

impl StrategyHost for MockHost {
    fn is_shutdown(&self) -> Result<bool, ProgramError> {
        Ok(self.chain.borrow().shutdown)
    }
}

pub struct Fixture {
    pub chain: SharedChain,
    pub config: StrategyConfig,
    pub keys: Keys,
    pub with_incentives: bool,
}

impl Fixture {
    /// Pool of 1000 deposits / 1000 shares, strategy holding `shares` of them
    pub fn new(shares: u64) -> Self {
        let keys = Keys {
            management: Pubkey::new_unique(),
            keeper: Pubkey::new_unique(),
            emergency_admin: Pubkey::new_unique(),
            ledger: Pubkey::new_unique(),
            auction: Pubkey::new_unique(),
            outsider: Pubkey::new_unique(),
            reserve_vault: Pubkey::new_unique(),
            auction_vault: Pubkey::new_unique(),
        };

        let params = StrategyParams {
            keeper: keys.keeper,
            emergency_admin: keys.emergency_admin,
            ledger: keys.ledger,
            ledger_status: Pubkey::new_unique(),
            asset: Pubkey::new_unique(),
            share_token: Pubkey::new_unique(),
            reward_token: Pubkey::new_unique(),
            yield_source_program: Pubkey::new_unique(),
            reserve: Pubkey::new_unique(),
            use_as_collateral: false,
            incentives_controller: Some(Pubkey::new_unique()),
            auction_program: Pubkey::new_unique(),
            auction: keys.auction,
        };
        let config = StrategyConfig::new(keys.management, Pubkey::new_unique(), 255, params);

        let mut chain = Chain {
            share_supply: 1000,
            total_deposits: 1000,
            ..Chain::default()
        };
        chain.set_balance(&config.share_token, &config.custody, shares);
        chain.set_balance(&config.asset, &keys.reserve_vault, 1000);

        Self {
            chain: Rc::new(RefCell::new(chain)),
            config,
            keys,
            with_incentives: true,
        }
    }

    pub fn without_incentives(mut self) -> Self {
        self.with_incentives = false;
        self.config.incentives_controller = None;
        self
    }

    /// Run `f` against a strategy bound to this chain
    pub fn run<R>(&self, f: impl FnOnce(&mut LenderStrategy<'_>) -> R) -> R {
        let tokens = MockTokens { chain: self.chain.clone() };
        let mut yield_source = MockYieldSource {
            chain: self.chain.clone(),
            config: self.config.clone(),
            vault: self.keys.reserve_vault,
        };
        let mut incentives = MockIncentives {
            chain: self.chain.clone(),
            config: self.config.clone(),
        };
        let mut auction = MockAuction {
            chain: self.chain.clone(),
            config: self.config.clone(),
            vault: self.keys.auction_vault,
        };
        let host = MockHost { chain: self.chain.clone() };

        let incentives: Option<&mut dyn IncentivesController> = if self.with_incentives {
            Some(&mut incentives as &mut dyn IncentivesController)
        } else {
            None
        };

        let env = Collaborators {
            tokens: &tokens,
            yield_source: &mut yield_source,
            incentives,
            auction: &mut auction,
            host: &host,
        };
        let mut strategy = LenderStrategy::new(&self.config, env);
        f(&mut strategy)
    }

    pub fn chain(&self) -> std::cell::Ref<'_, Chain> {
        self.chain.borrow()
    }

    pub fn chain_mut(&self) -> std::cell::RefMut<'_, Chain> {
        self.chain.borrow_mut()
    }

    pub fn shares(&self) -> u64 {
        self.chain().balance(&self.config.share_token, &self.config.custody)
    }

    pub fn loose(&self) -> u64 {
        self.chain().balance(&self.config.asset, &self.config.custody)
    }

    pub fn rewards(&self) -> u64 {
        self.chain().balance(&self.config.reward_token, &self.config.custody)
    }

    /// Asset arriving in custody outside any strategy call
    pub fn airdrop_asset(&self, amount: u64) {
        let (asset, custody) = (self.config.asset, self.config.custody);
        let mut chain = self.chain_mut();
        let balance = chain.balance(&asset, &custody);
        chain.set_balance(&asset, &custody, balance + amount);
    }
}
