pub mod contest;
pub mod scheduler;
