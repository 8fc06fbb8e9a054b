pub mod ai;
pub mod gto;
pub mod report;
pub mod select;

pub use report::*;
pub use select::*;
