mod observable;
mod store;

pub use observable::*;
pub use store::*;
