pub mod contest;
pub mod shared;
