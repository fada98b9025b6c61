pub mod config;
pub mod observability;
pub mod recipes;
pub mod render;

pub use config::Config;
