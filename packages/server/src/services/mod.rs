pub mod achievements;
pub mod notifier;
