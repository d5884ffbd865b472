pub mod types;
pub mod narrative;

pub use types::*;
pub use narrative::*;
