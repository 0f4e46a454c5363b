pub mod analytics;
pub mod generator;
pub mod locations;
pub mod summary;
pub mod utils;
pub mod views;
