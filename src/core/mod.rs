pub mod engine;
pub mod notifier;
