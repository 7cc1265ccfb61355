mod client;
mod error;
#[cfg(test)]
pub mod stub;

pub use client::*;
pub use error::*;
