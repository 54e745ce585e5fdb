pub mod batch;
pub mod generator;
pub mod replace;
