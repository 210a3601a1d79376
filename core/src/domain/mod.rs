pub mod channel;
pub mod common;
pub mod messaging;
pub mod recipe;
