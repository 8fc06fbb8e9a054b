pub mod deviation;

pub use deviation::*;
