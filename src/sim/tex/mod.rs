mod drivetrain;
mod terrain;
#[allow(clippy::module_inception)]
mod tex;
mod tex_config;
mod tex_controls;
mod tex_state;
mod wheel;

pub use drivetrain::*;
pub use terrain::*;
pub use tex::*;
pub use tex_config::*;
pub use tex_controls::*;
pub use tex_state::*;
pub use wheel::*;
