pub mod regression;
pub mod rolling;
pub mod stats;
