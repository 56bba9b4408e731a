// Public API types not tied to the graph or the scope

pub mod configuration;
pub mod statistics;

pub use configuration::Configuration;
pub use statistics::{Statistics, StatisticsSnapshot};
