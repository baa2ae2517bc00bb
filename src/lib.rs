pub use glam;

pub mod consts;
pub mod math;

#[cfg(feature = "serde")]
pub mod config_file;
mod error;
mod logging;
mod sim;

pub use error::*;
pub use logging::init_logging;
pub use sim::*;
