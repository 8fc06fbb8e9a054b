pub mod client;
pub mod prompt;

pub use client::*;
pub use prompt::*;
