pub mod sma_cross;
pub mod traits;
