mod chat;
mod config;
mod history;

pub use chat::*;
pub use config::*;
pub use history::*;
