pub mod analyzers;
pub mod config;
pub mod error;
pub mod expand;
pub mod loader;
pub mod output;
pub mod select;
pub mod stats;
