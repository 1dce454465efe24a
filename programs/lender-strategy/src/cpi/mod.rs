// Cross-Program Invocation (CPI) bindings
//
// Implementations of the collaborator interfaces against the yield source,
// incentives controller, auction and outer ledger programs. Strategy funds
// are held by the custody PDA, which signs every outgoing call.

pub mod auction;
pub mod incentives;
pub mod ledger;
pub mod token;
pub mod yield_source;

pub use auction::CpiAuction;
pub use incentives::CpiIncentivesController;
pub use ledger::LedgerStatusHost;
pub use token::SplTokenLedger;
pub use yield_source::CpiYieldSource;
