pub mod chart;
mod controller;
pub mod panel;
pub mod trending;

pub use controller::*;
