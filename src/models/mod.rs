pub mod user;
pub mod vote;
