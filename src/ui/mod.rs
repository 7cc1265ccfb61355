mod app;
mod colors;

pub use app::*;
pub use colors::*;
