pub mod commands;
pub mod state;

pub use commands::Command;
pub use state::Session;
