pub mod classify;
pub mod summary;

pub use classify::*;
pub use summary::*;
