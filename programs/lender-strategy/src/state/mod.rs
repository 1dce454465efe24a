pub mod auction;
pub mod external;
pub mod hook_policy;
pub mod strategy_config;

pub use auction::*;
pub use hook_policy::*;
pub use strategy_config::*;
