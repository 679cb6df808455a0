pub mod config;
pub mod contest;
pub mod moderation;
pub mod voting;

pub use contest::{ContestStatus, ContestType, ScoringMode};
pub use moderation::{ModerationStatus, VotingVerdict};
pub use voting::VotingSettings;
