pub mod web;
pub mod whatsapp;

pub use web::format_for_web;
pub use whatsapp::{ChannelMessage, format_for_messaging_channel};
