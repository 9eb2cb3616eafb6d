pub mod analysis;
pub mod batch;
pub mod chart;
pub mod clean;
pub mod cli;
pub mod config;
pub mod ctx;
pub mod error;
pub mod input;
pub mod io;
pub mod math;
pub mod numeric;
pub mod pipeline;
pub mod schema;
pub mod series;
pub mod transform;
