mod coin_data;
pub mod currency;
pub mod seed;

pub use coin_data::*;
