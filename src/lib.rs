//! A GitHub profile dashboard: fetches a user and their repositories from the
//! GitHub REST API, then renders statistics, a language distribution and a stars
//! ranking.

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
