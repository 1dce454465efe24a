use borsh::{BorshDeserialize, BorshSerialize};

/// Raw callback switches understood by the auction program
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HookFlags {
    pub kickable: bool,
    pub kick: bool,
    pub pre_take: bool,
    pub post_take: bool,
}

/// The hook combinations this strategy runs with.
///
/// Kick gating and pre-take logic are never used, so only the post-take
/// callback can be switched on.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPolicy {
    NoneActive,
    /// Redeploy loose asset after every fill
    PostTakeRedeploy,
}

impl HookPolicy {
    pub fn from_post_take(enabled: bool) -> Self {
        if enabled {
            HookPolicy::PostTakeRedeploy
        } else {
            HookPolicy::NoneActive
        }
    }

    pub fn flags(&self) -> HookFlags {
        HookFlags {
            kickable: false,
            kick: false,
            pre_take: false,
            post_take: matches!(self, HookPolicy::PostTakeRedeploy),
        }
    }

    /// Map flags read back from the auction; None if they are outside the policy
    pub fn from_flags(flags: HookFlags) -> Option<Self> {
        if flags.kickable || flags.kick || flags.pre_take {
            return None;
        }
        Some(Self::from_post_take(flags.post_take))
    }
}
