pub mod currency;
pub mod order;
pub mod range;
pub mod report;
pub mod settings;
pub mod summary;
