mod fetcher;
mod renderer;
mod search;

pub use fetcher::*;
pub use renderer::*;
pub use search::*;
