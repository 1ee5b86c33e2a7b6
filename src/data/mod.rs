//! Data module - CSV loading and cleaning

pub(crate) mod loader;
mod processor;
mod table;

pub use loader::DataLoader;
pub use processor::DataProcessor;
pub use table::{WeatherRecord, WeatherTable};
