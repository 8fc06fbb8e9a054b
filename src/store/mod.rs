pub mod record;
pub mod results;

pub use record::*;
pub use results::*;
