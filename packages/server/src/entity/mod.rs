pub mod contest;
pub mod contest_entry;
pub mod leaderboard_rating;
pub mod notification;
pub mod season_stat;
pub mod setting;
pub mod user;
