mod fetcher_rest;
mod renderer_terminal;
mod search_sequential;
mod search_session;

pub use fetcher_rest::*;
pub use renderer_terminal::*;
pub use search_sequential::*;
pub use search_session::*;
