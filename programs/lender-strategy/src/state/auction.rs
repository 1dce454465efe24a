use solana_program::pubkey::Pubkey;

/// Token pair sold by one auction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionPair {
    pub from: Pubkey,
    pub to: Pubkey,
}

/// Lifecycle of an auction for one pair:
/// `Idle -> Kicked -> {Settled, Expired} -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    Idle,
    Kicked { available: u64, kicked_at: i64 },
    Settled,
    Expired { unsold: u64 },
}

impl AuctionStatus {
    /// Classify raw auction data at time `now`
    pub fn resolve(kicked_at: i64, auction_length: i64, available: u64, now: i64) -> Self {
        if kicked_at == 0 {
            return AuctionStatus::Idle;
        }

        if available == 0 {
            return AuctionStatus::Settled;
        }

        if now > kicked_at.saturating_add(auction_length) {
            AuctionStatus::Expired { unsold: available }
        } else {
            AuctionStatus::Kicked { available, kicked_at }
        }
    }

    /// Funds are sitting in a live auction
    pub fn in_flight(&self) -> bool {
        matches!(self, AuctionStatus::Kicked { .. })
    }
}
