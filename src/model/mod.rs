mod chart;
mod color;
mod counter;
mod entities;
mod error;
mod statistics;

pub use chart::*;
pub use color::*;
pub use counter::*;
pub use entities::*;
pub use error::*;
pub use statistics::*;
