//! API endpoint implementations

pub mod account;
pub mod fund;
pub mod market;
pub mod order;

pub use account::AccountEndpoints;
pub use fund::FundEndpoints;
pub use market::MarketEndpoints;
pub use order::OrderEndpoints;
