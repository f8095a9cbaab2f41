pub mod contest;
pub mod profile;
pub mod submission;
pub mod vote;
