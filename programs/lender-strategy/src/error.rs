use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Invalid instruction")]
    InvalidInstruction = 0,

    #[error("Account not initialized")]
    AccountNotInitialized = 1,

    #[error("Account already initialized")]
    AccountAlreadyInitialized = 2,

    #[error("Caller lacks the required role")]
    Unauthorized = 3,

    #[error("Account does not match strategy configuration")]
    AccountMismatch = 4,

    #[error("Invalid strategy configuration")]
    InvalidConfiguration = 5,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 6,

    #[error("Share balance exceeds share supply")]
    ShareBalanceExceedsSupply = 7,

    #[error("Auction pair not supported")]
    UnsupportedAuctionPair = 8,

    #[error("Strategy is not shut down")]
    NotShutdown = 9,

    #[error("External account data could not be decoded")]
    InvalidExternalAccount = 10,
}

impl PrintProgramError for StrategyError {
    fn print<E>(&self) {
        use solana_program::msg;
        msg!("StrategyError: {}", self);
    }
}

impl From<StrategyError> for ProgramError {
    fn from(e: StrategyError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for StrategyError {
    fn type_of() -> &'static str {
        "StrategyError"
    }
}
