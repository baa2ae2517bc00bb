mod authority;
mod chair;
mod cues;
mod linear_piece_curve;
mod phys_state;
mod raycast;
mod sync;
mod tex;
mod tick_driver;

pub use authority::*;
pub use chair::*;
pub use cues::*;
pub use linear_piece_curve::*;
pub use phys_state::*;
pub use raycast::*;
pub use sync::*;
pub use tex::*;
pub use tick_driver::*;
