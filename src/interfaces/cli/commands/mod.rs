//! CLI command implementations

mod click;
mod config_gen;
mod counts;
mod events;

pub use click::*;
pub use config_gen::*;
pub use counts::*;
pub use events::*;
