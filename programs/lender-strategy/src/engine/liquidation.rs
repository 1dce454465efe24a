use solana_program::{
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    access::{AccessPolicy, AuthorizationContext, Role},
    error::StrategyError,
    state::{AuctionPair, HookPolicy},
};

use super::LenderStrategy;

impl<'a> LenderStrategy<'a> {
    /// The only pair this strategy ever sells
    pub fn auction_pair(&self) -> AuctionPair {
        AuctionPair {
            from: self.config.reward_token,
            to: self.config.asset,
        }
    }

    /// Kick the auction selling `from` for `to`. A rejection by the auction
    /// module (for instance an auction already running) is returned as is.
    pub fn enable_auction(&mut self, from: &Pubkey, to: &Pubkey) -> Result<u64, ProgramError> {
        let pair = AuctionPair { from: *from, to: *to };
        if pair != self.auction_pair() {
            msg!("Refusing to auction {} for {}", from, to);
            return Err(StrategyError::UnsupportedAuctionPair.into());
        }

        let kicked = self.env.auction.kick(from)?;
        msg!("Kicked auction of {} {} for {}", kicked, from, to);
        Ok(kicked)
    }

    /// Amount of `token` that could be put up for auction right now
    pub fn kickable(&self, token: &Pubkey) -> Result<u64, ProgramError> {
        if *token != self.config.reward_token {
            return Ok(0);
        }

        if self.env.auction.status(token)?.in_flight() {
            return Ok(0);
        }

        self.reward_balance()
    }

    /// Keeper entry to sell rewards left in custody, for instance rewards
    /// claimed while an earlier auction of the pair was still running.
    /// Returns the amount put up, 0 when nothing is kickable.
    pub fn kick_auction(
        &mut self,
        ctx: &AuthorizationContext,
        token: &Pubkey,
    ) -> Result<u64, ProgramError> {
        AccessPolicy::new(self.config).require(ctx, Role::Keeper)?;

        if self.kickable(token)? == 0 {
            msg!("Nothing to kick for {}", token);
            return Ok(0);
        }

        let asset = self.config.asset;
        self.enable_auction(token, &asset)
    }

    /// Post-take callback from the auction. Fill amounts are ignored: every
    /// loose asset unit is redeployed, including funds that arrived by other
    /// means since the last report.
    pub fn on_post_take(
        &mut self,
        ctx: &AuthorizationContext,
        token: &Pubkey,
        amount_taken: u64,
        amount_paid: u64,
    ) -> Result<(), ProgramError> {
        AccessPolicy::new(self.config).require(ctx, Role::Auction)?;

        msg!("Post take: {} of {} taken for {}", amount_taken, token, amount_paid);

        let loose = self.loose_balance()?;
        if loose > 0 {
            self.deploy_funds(loose)?;
        }

        Ok(())
    }

    pub fn hook_policy(&self) -> Result<Option<HookPolicy>, ProgramError> {
        Ok(HookPolicy::from_flags(self.env.auction.hook_flags()?))
    }

    /// Switch post-take redeployment on or off
    pub fn set_post_take_hook_flag(
        &mut self,
        ctx: &AuthorizationContext,
        enabled: bool,
    ) -> Result<HookPolicy, ProgramError> {
        AccessPolicy::new(self.config).require(ctx, Role::Management)?;

        let policy = HookPolicy::from_post_take(enabled);
        self.env.auction.set_hook_flags(policy.flags())?;

        msg!("Auction hook policy set to {:?}", policy);
        Ok(policy)
    }
}
