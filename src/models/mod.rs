mod chat;
mod history;

pub use chat::*;
pub use history::*;
