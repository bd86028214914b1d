pub mod binance;
pub mod messages;
pub mod telegram;
pub mod traits;
