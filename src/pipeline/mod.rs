pub mod extraction;
pub mod analysis;
pub mod report;
