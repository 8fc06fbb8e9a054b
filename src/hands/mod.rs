pub mod hand;
pub mod store;

pub use hand::*;
pub use store::*;
