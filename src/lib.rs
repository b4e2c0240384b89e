pub mod aggregate;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod profile;
pub mod types;
