pub mod enums;
pub mod lab;
pub mod summary;

pub use enums::*;
pub use lab::*;
pub use summary::*;
