#[allow(clippy::module_inception)]
mod chair;
mod chair_config;
mod hover_state;

pub use chair::*;
pub use chair_config::*;
pub use hover_state::*;
